use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brc-processor")]
#[command(about = "Per-station min/mean/max over a <station>;<temperature> measurements file")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Measurements file, one <station>;<temperature> record per line")]
    pub input: PathBuf,

    #[arg(
        short = 'w',
        long,
        help = "Partitions and worker threads [default: number of CPUs]"
    )]
    pub max_workers: Option<usize>,

    #[arg(short, long, help = "Settings file [default: ./brc.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Show partition progress on stderr")]
    pub progress: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}
