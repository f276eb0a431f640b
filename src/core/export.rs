//! Cumulative series as CSV, one `label,time,cumulative` row per bucket.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::aggregate::CumulativeSeries;

pub const EXPORT_HEADER: &str = "label,time,cumulative";

fn write_label<W: Write>(out: &mut W, label: &str) -> std::io::Result<()> {
    if label.contains([',', '"', '\n']) {
        write!(out, "\"{}\"", label.replace('"', "\"\""))
    } else {
        out.write_all(label.as_bytes())
    }
}

pub fn write_cumulative<'a, W, I>(out: &mut W, series: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a CumulativeSeries)>,
{
    writeln!(out, "{EXPORT_HEADER}")?;
    for (label, data) in series {
        for &(time, count) in data.points() {
            write_label(out, label)?;
            writeln!(out, ",{time:.6},{count}")?;
        }
    }
    out.flush()
}

pub fn export_to_csv<'a, I>(path: &Path, series: I) -> std::io::Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a CumulativeSeries)>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write_cumulative(&mut out, series)
}
