use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
pub mod plot;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// The main struct for the per-flow throughput time series.
/// One entry per trace record, kept in file order;
/// grouping by flow id happens at plot time.
#[derive(Debug, Clone)]
pub struct ThroughputTrace {
    pub time: Vec<f64>,
    pub flow_id: Vec<u32>,
    pub throughput: Vec<f64>,
}

impl ThroughputTrace {
    pub fn new(capacity: usize) -> ThroughputTrace {
        let time: Vec<f64> = Vec::with_capacity(capacity);
        let flow_id: Vec<u32> = Vec::with_capacity(capacity);
        let throughput: Vec<f64> = Vec::with_capacity(capacity);
        ThroughputTrace {
            time,
            flow_id,
            throughput,
        }
    }

    /// Init a ThroughputTrace from a whitespace-delimited trace file,
    /// one `<time> <flow_id> <throughput>` record per line.
    /// Blank lines are skipped, any other malformed line is fatal;
    /// the simulation writes the file, there is nothing to recover.
    pub fn from_txt(fin: PathBuf) -> ThroughputTrace {
        let file = match File::open(&fin) {
            Ok(f) => f,
            Err(e) => panic!("could not open {}, error: {}", fin.display(), e),
        };
        let buf = BufReader::new(file);
        let mut trace = ThroughputTrace::new(10000 as usize);
        for (n, l) in buf.lines().enumerate() {
            let l_unwrap = match l {
                Ok(l_ok) => l_ok,
                Err(l_err) => {
                    println!("Err, could not read/unwrap line {}", l_err);
                    continue;
                }
            };
            if l_unwrap.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = l_unwrap.split_whitespace().collect();
            if fields.len() != 3 {
                panic!(
                    "line {} of {} has {} fields instead of 3: {}",
                    n + 1,
                    fin.display(),
                    fields.len(),
                    l_unwrap
                );
            }
            let numbers: Vec<f64> = fields
                .iter()
                .map(|s| match s.parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => panic!(
                        "line {} of {} has a non-numeric field: {}",
                        n + 1,
                        fin.display(),
                        s
                    ),
                })
                .collect();
            trace.time.push(numbers[0]);
            trace.flow_id.push(numbers[1] as u32);
            trace.throughput.push(numbers[2]);
        }
        trace
    }

    /// distinct flow ids, ascending
    pub fn unique_flow_ids(&self) -> Vec<u32> {
        let mut fids = self.flow_id.clone();
        fids.sort_unstable();
        fids.dedup();
        fids
    }

    /// the (time, throughput) points of one flow, in file order
    pub fn flow_series(&self, fid: u32) -> Vec<(f64, f64)> {
        self.time
            .iter()
            .zip(self.flow_id.iter())
            .zip(self.throughput.iter())
            .filter(|((_, &f), _)| f == fid)
            .map(|((&t, _), &tp)| (t, tp))
            .collect()
    }

    /// plots the throughput time series to png, one labeled curve per flow id
    pub fn plot_throughput(
        &self,
        fout: PathBuf,
        title: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.time.is_empty() {
            return Err(format!("no records to plot for {}", fout.display()).into());
        }
        let (xmin, xmax) = min_and_max(&self.time[..]);
        let xmargin = (xmax - xmin) / 20f64;
        let xmin = xmin - xmargin;
        let xmax = xmax + xmargin;
        let (_, ymax) = min_and_max(&self.throughput[..]);
        // throughput is a rate, anchor the y axis at zero
        let ymax = ymax * 1.1f64;
        let root = BitMapBackend::new(&fout, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(xmin..xmax, 0f64..ymax)?;
        chart
            .configure_mesh()
            .label_style(("sans-serif", 18))
            .x_desc("Time (s)")
            .y_desc("Throughput (Mbps)")
            .draw()?;
        for (idx, fid) in self.unique_flow_ids().into_iter().enumerate() {
            let color = Palette99::pick(idx).mix(1.0);
            let line = LineSeries::new(self.flow_series(fid).into_iter(), color.stroke_width(2));
            chart
                .draw_series(line)?
                .label(format!("Flow {}", fid))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        root.present()?;
        Ok(())
    }
}

impl std::fmt::Display for ThroughputTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "time_s flow_id throughput_mbps\n")?;
        for ((t, fid), tp) in self
            .time
            .iter()
            .zip(self.flow_id.iter())
            .zip(self.throughput.iter())
        {
            write!(f, "{} {} {}\n", t, fid, tp)?
        }
        Ok(())
    }
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> (T, T) {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => panic!("could not iterate over slice"),
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    return (min, max);
}

/// Chart caption from the trace file name:
/// the stem up to the first `-`, uppercased, names the queueing scheme,
/// so `spq-throughput.txt` becomes `SPQ Throughput vs. Time`.
pub fn title_for(fin: &Path) -> String {
    let stem = fin.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let scheme = stem.split('-').next().unwrap_or_default().to_uppercase();
    format!("{} Throughput vs. Time", scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_trace(name: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn flow_ids_come_back_sorted_ascending() {
        let path = write_trace(
            "diffserv_plot_sorted.txt",
            "0.0 1 3.0\n0.5 0 2.0\n1.0 1 3.5\n1.5 0 2.5\n",
        );
        let trace = ThroughputTrace::from_txt(path);
        assert_eq!(trace.unique_flow_ids(), vec![0, 1]);
        assert_eq!(trace.flow_series(0), vec![(0.5, 2.0), (1.5, 2.5)]);
    }

    #[test]
    fn single_record_gives_single_point_series() {
        let path = write_trace("diffserv_plot_single.txt", "0.0 1 5.0\n");
        let trace = ThroughputTrace::from_txt(path);
        assert_eq!(trace.unique_flow_ids(), vec![1]);
        assert_eq!(trace.flow_series(1), vec![(0.0, 5.0)]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let path = write_trace("diffserv_plot_blank.txt", "\n0.0 0 1.0\n\n1.0 0 1.5\n   \n");
        let trace = ThroughputTrace::from_txt(path);
        assert_eq!(trace.time.len(), 2);
    }

    #[test]
    #[should_panic]
    fn non_numeric_field_is_fatal() {
        let path = write_trace("diffserv_plot_nonnum.txt", "0.0 abc 1.0\n");
        ThroughputTrace::from_txt(path);
    }

    #[test]
    #[should_panic]
    fn wrong_field_count_is_fatal() {
        let path = write_trace("diffserv_plot_twofields.txt", "0.0 1\n");
        ThroughputTrace::from_txt(path);
    }

    #[test]
    fn empty_trace_refuses_to_plot() {
        let trace = ThroughputTrace::new(0);
        let res = trace.plot_throughput(PathBuf::from("diffserv_plot_empty.png"), "empty");
        assert!(res.is_err());
    }

    #[test]
    fn png_name_swaps_the_extension() {
        let mut fout = PathBuf::from("spq-throughput.txt");
        fout.set_extension("png");
        assert_eq!(fout, PathBuf::from("spq-throughput.png"));
    }

    #[test]
    fn titles_name_the_queueing_scheme() {
        assert_eq!(
            title_for(Path::new("spq-throughput.txt")),
            "SPQ Throughput vs. Time"
        );
        assert_eq!(
            title_for(Path::new("drr-throughput.txt")),
            "DRR Throughput vs. Time"
        );
    }

    #[test]
    fn min_and_max_on_unordered_data() {
        assert_eq!(min_and_max(&[3.0, 1.0, 2.0][..]), (1.0, 3.0));
    }

    #[test]
    fn display_echoes_the_records() {
        let path = write_trace("diffserv_plot_display.txt", "0.0 1 5.0\n");
        let trace = ThroughputTrace::from_txt(path);
        assert_eq!(trace.to_string(), "time_s flow_id throughput_mbps\n0 1 5\n");
    }
}
