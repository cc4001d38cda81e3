use diffserv_plot::plot::parse_cli;
use diffserv_plot::{title_for, ThroughputTrace};

fn main() {
    let (txtin, pngout, title) = parse_cli();
    let single = txtin.len() == 1;
    for fin in txtin {
        let fout = match (&pngout, single) {
            (Some(p), true) => p.clone(),
            _ => {
                let mut fout = fin.clone();
                fout.set_extension("png");
                fout
            }
        };
        let caption = match (&title, single) {
            (Some(t), true) => t.clone(),
            _ => title_for(&fin),
        };
        println!(
            "read data from {} and plot to {}",
            fin.to_str().unwrap(),
            fout.to_str().unwrap()
        );
        let trace = ThroughputTrace::from_txt(fin);
        trace.plot_throughput(fout, &caption).unwrap();
    }
}
