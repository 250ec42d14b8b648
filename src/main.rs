//! Runs a configurable reader/writer workload against [`rwlock::ReaderWriterLock`] and
//! reports the observed read concurrency and any exclusivity violation.
//!
//! Every option is taken from a command-line flag, then from an environment variable,
//! then from [`WorkloadConfig::default`]:
//! - `--readers` / `RWLOCK_READERS`
//! - `--writers` / `RWLOCK_WRITERS`
//! - `--iterations` / `RWLOCK_ITERATIONS`
//! - `--max-hold-us` / `RWLOCK_MAX_HOLD_US`

use anyhow::{anyhow, bail, Context, Result};
use log::{error, info};
use rwlock::workload::{config::WorkloadConfig, execute_workload::execute_workload};
use std::{env, str::FromStr, time::Duration};

/// Main function.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_config(&env::args().collect::<Vec<String>>())?;
    info!("Configuration: {}", config);

    // Execute defined workload
    let report = execute_workload(&config)?;
    println!("{}", report);

    if !report.is_sound() {
        error!("Exclusivity violated {} times", report.violations);
        bail!("Reader/writer exclusivity violated.");
    }

    Ok(())
}

fn parse_config(args: &[String]) -> Result<WorkloadConfig> {
    let default = WorkloadConfig::default();

    let readers = option(args, "--readers", "RWLOCK_READERS")?.unwrap_or(default.readers);
    let writers = option(args, "--writers", "RWLOCK_WRITERS")?.unwrap_or(default.writers);
    let iterations =
        option(args, "--iterations", "RWLOCK_ITERATIONS")?.unwrap_or(default.iterations);
    let max_hold = option::<u64>(args, "--max-hold-us", "RWLOCK_MAX_HOLD_US")?
        .map(Duration::from_micros)
        .unwrap_or(default.max_hold);

    let config = WorkloadConfig::default()
        .with_readers(readers)
        .with_writers(writers)
        .with_iterations(iterations)
        .with_max_hold(max_hold);
    config.validate()?;

    Ok(config)
}

/// Value of `flag` in `args`, else of environment variable `var`, parsed as `T`.
fn option<T>(args: &[String], flag: &str, var: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = match args.iter().position(|a| a == flag) {
        Some(i) => Some(
            args.get(i + 1)
                .cloned()
                .ok_or(anyhow!("Missing value for {}", flag))?,
        ),
        None => env::var(var).ok(),
    };

    raw.map(|value| {
        value
            .parse::<T>()
            .with_context(|| format!("Invalid value {:?} for {} / {}", value, flag, var))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::parse_config;
    use anyhow::Result;
    use std::time::Duration;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_override_defaults() -> Result<()> {
        let config = parse_config(&args(&[
            "rwlock",
            "--readers",
            "3",
            "--writers",
            "1",
            "--iterations",
            "10",
            "--max-hold-us",
            "5",
        ]))?;

        assert_eq!(config.readers, 3);
        assert_eq!(config.writers, 1);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.max_hold, Duration::from_micros(5));
        Ok(())
    }

    #[test]
    fn invalid_flags_are_rejected() {
        assert!(parse_config(&args(&["rwlock", "--readers", "many"])).is_err());
        assert!(parse_config(&args(&["rwlock", "--writers"])).is_err());
        assert!(parse_config(&args(&["rwlock", "--iterations", "0"])).is_err());
    }
}
