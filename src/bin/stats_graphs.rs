use anyhow::Context;
use stats_graphs::graphs_cli::parse_cli;
use stats_graphs::{render_dir, SUFFIX_PAIRS};

fn main() -> anyhow::Result<()> {
    let (dir, verbose) = parse_cli();
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("rendering charts in {:?}", dir);
    render_dir(&dir, &SUFFIX_PAIRS).with_context(|| format!("rendering charts in {:?}", dir))
}
