use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use subloc::{InvocationOptions, LauncherConfig, SystemRunner, launch, plan, query_version};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_version(config: &LauncherConfig) {
    println!("subloc {}", env!("CARGO_PKG_VERSION"));
    let code = query_version(config, &SystemRunner);
    debug!("Version query exited with {:?}", code);
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.log);

    let config = args.launcher_config()?;
    debug!("Launcher config: {:?}", config);

    if args.version {
        print_version(&config);
        return Ok(());
    }

    let options = InvocationOptions::resolve(
        args.seq.as_deref(),
        args.tax.as_deref(),
        args.outdir.as_deref(),
        args.pass_through(),
    )?;
    info!("Sequence file: {:?}", options.seq);
    info!("Taxonomy file: {:?}", options.tax);
    info!("Output directory: {:?}", options.outdir);

    if args.dry_run {
        println!("{}", plan(&options, &config)?.render());
        return Ok(());
    }

    launch(&options, &config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn entries(dir: &std::path::Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn missing_sequence_stops_before_touching_outdir() {
        let tmp = TempDir::new().unwrap();
        let tax = tmp.path().join("tax.csv");
        fs::write(&tax, "p1,Eukaryota\n").unwrap();
        let out = tmp.path().join("out");
        fs::create_dir(&out).unwrap();

        let args = CliArgs::try_parse_from([
            "subloc".into(),
            "-t".into(),
            tax.clone().into_os_string(),
            "-r".into(),
            out.clone().into_os_string(),
        ])
        .unwrap();
        let err = run(args).unwrap_err();

        assert!(err.is_usage());
        assert!(err.guidance().unwrap().contains("-i/--seq"));
        assert_eq!(entries(&out), 0);
    }

    #[test]
    fn nonexistent_sequence_is_a_usage_error() {
        let tmp = TempDir::new().unwrap();
        let tax = tmp.path().join("tax.csv");
        fs::write(&tax, "p1,Eukaryota\n").unwrap();

        let args = CliArgs::try_parse_from([
            "subloc".into(),
            "-i".into(),
            tmp.path().join("missing.fasta").into_os_string(),
            "-t".into(),
            tax.into_os_string(),
            "-r".into(),
            tmp.path().as_os_str().to_owned(),
        ])
        .unwrap();

        assert_eq!(run(args).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn dry_run_stages_nothing() {
        let tmp = TempDir::new().unwrap();
        let seq = tmp.path().join("a.fasta");
        let tax = tmp.path().join("tax.csv");
        let out = tmp.path().join("out");
        fs::write(&seq, ">p1\nMKV\n").unwrap();
        fs::write(&tax, "p1,Eukaryota\n").unwrap();
        fs::create_dir(&out).unwrap();

        let args = CliArgs::try_parse_from([
            "subloc".into(),
            "-i".into(),
            seq.into_os_string(),
            "-t".into(),
            tax.into_os_string(),
            "-r".into(),
            out.clone().into_os_string(),
            "--dry-run".into(),
        ])
        .unwrap();

        run(args).unwrap();
        assert_eq!(entries(&out), 0);
    }

    #[test]
    fn bad_config_file_is_not_a_usage_error() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("subloc.json");
        fs::write(&config, r#"{ "runtime": "lxc" }"#).unwrap();

        let args = CliArgs::try_parse_from([
            "subloc".into(),
            "--config".into(),
            config.into_os_string(),
        ])
        .unwrap();
        let err = run(args).unwrap_err();

        assert!(!err.is_usage());
        assert_eq!(err.exit_code(), 1);
    }
}
