use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("mex-energy").chain(args.iter().copied()))
}

#[test]
fn watch_rejects_zero_ticks() {
    let err = parse(&["watch", "--ticks", "0"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn watch_accepts_positive_ticks() {
    let cli = parse(&["watch", "--ticks", "3", "--interval-ms", "50"]).unwrap();
    let Command::Watch(args) = cli.command else {
        panic!("expected watch");
    };
    assert_eq!(args.ticks, Some(3));
    assert_eq!(args.interval_ms, Some(50));
}

#[test]
fn global_flags_follow_the_subcommand() {
    let cli = parse(&["treemap", "--group-by", "size", "--source", "sin", "--seed", "7"]).unwrap();
    assert_eq!(cli.source, DataSource::Sin);
    assert_eq!(cli.seed, Some(7));
    let Command::Treemap(args) = cli.command else {
        panic!("expected treemap");
    };
    assert_eq!(args.group_by, Dimension::Size);
    assert_eq!(args.color_by, Metric::Roi);
}
