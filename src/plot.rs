use super::VERSION;
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the throughput traces.
/// Without `-f` the app plots the two conventional simulation outputs,
/// `spq-throughput.txt` and `drr-throughput.txt`.
pub fn parse_cli() -> (Vec<PathBuf>, Option<PathBuf>, Option<String>) {
    let arg_txtin = Arg::with_name("input_txtfile")
        .help("throughput trace file(s), one <time> <flow_id> <throughput> record per line")
        .short("f")
        .long("txtfile")
        .takes_value(true)
        .multiple(true);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file, only honored for a single input file")
        .short("o")
        .long("pngfile")
        .takes_value(true);
    let arg_title = Arg::with_name("title")
        .help("chart caption, only honored for a single input file")
        .short("t")
        .long("title")
        .takes_value(true);
    let cli_args = App::new("Diffserv_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot per-flow throughput from diffserv simulation traces")
        .arg(arg_txtin)
        .arg(arg_pngout)
        .arg(arg_title)
        .get_matches();
    let txtin: Vec<PathBuf> = match cli_args.values_of("input_txtfile") {
        Some(vals) => vals.map(PathBuf::from).collect(),
        None => vec![
            PathBuf::from("spq-throughput.txt"),
            PathBuf::from("drr-throughput.txt"),
        ],
    };
    let pngout = cli_args.value_of("output_pngfile").map(PathBuf::from);
    let title = cli_args.value_of("title").map(String::from);
    return (txtin, pngout, title);
}
