use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    time::Instant,
};

use log::{debug, info};

use crate::{
    Skipped,
    aggregate::{Comparison, SeriesOutcome, compare},
    core::{
        bounds::terminal_geometry,
        color::{AnsiCode, Palette, colorize},
        export::export_to_csv,
        error::GraphError,
    },
    load_sources,
    render::{ChartStyle, render_comparison},
};

use super::parse::{PlotArgs, SummaryArgs, sources_or_default};

pub fn plot(a: PlotArgs) -> Result<(), GraphError> {
    let bin = a.bin.to_config()?;
    let mut palette = Palette::default();
    for s in &a.styles {
        palette.apply(s)?;
    }

    let t_ingest = Instant::now();
    let (series, _) = load_sources(&sources_or_default(&a.sources));
    let dur_ingest = t_ingest.elapsed().as_micros();

    let t_bin = Instant::now();
    let cmp = compare(series, &bin);
    let dur_bin = t_bin.elapsed().as_micros();

    if let Some(path) = &a.export {
        export_to_csv(path, cmp.ready())?;
        info!("cumulative series written to {}", path.display());
    }

    let (term_w, term_h) = terminal_geometry();
    let style = ChartStyle {
        title: a.title,
        subtitle: a.subtitle,
        palette,
        colored: !a.no_color,
        size: (
            a.width.unwrap_or(usize::from(term_w.0)),
            a.height.unwrap_or(usize::from(term_h.0)),
        ),
    };

    let t_render = Instant::now();
    if a.output == "-" {
        render_comparison(&mut stdout().lock(), &cmp, &style)?;
    } else {
        let mut out = BufWriter::new(File::create(&a.output)?);
        render_comparison(&mut out, &cmp, &style)?;
        out.flush()?;
        info!("graph saved as '{}'", a.output);
    }
    debug!(
        "ingest {dur_ingest} µs   binning {dur_bin} µs   render {} µs",
        t_render.elapsed().as_micros()
    );
    Ok(())
}

/// One table row: label, events, width, buckets, final count, status.
fn summary_row(label: &str, events: usize, outcome: &SeriesOutcome) -> String {
    match outcome {
        SeriesOutcome::Ready(c) => format!(
            "{label:<24} {events:>10} {:>10.3} {:>9} {:>10}  ok",
            c.width(),
            c.len(),
            c.total()
        ),
        SeriesOutcome::Empty => format!("{label:<24} {events:>10} {:>10} {:>9} {:>10}  empty", "-", 0, 0),
        SeriesOutcome::Failed(e) => {
            format!("{label:<24} {events:>10} {:>10} {:>9} {:>10}  failed: {e}", "-", "-", "-")
        }
    }
}

fn write_summary<W: Write>(
    out: &mut W,
    cmp: &Comparison,
    skipped: &[Skipped],
) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<24} {:>10} {:>10} {:>9} {:>10}  status",
        "series", "events", "width (s)", "buckets", "total"
    )?;
    for r in &cmp.reports {
        writeln!(out, "{}", summary_row(&r.label, r.events, &r.outcome))?;
    }
    for s in skipped {
        writeln!(
            out,
            "{:<24} {:>10} {:>10} {:>9} {:>10}  unreadable: {}",
            s.label, "-", "-", "-", "-", s.error
        )?;
    }
    Ok(())
}

pub fn summary(a: &SummaryArgs) -> Result<(), GraphError> {
    let bin = a.bin.to_config()?;
    let (series, skipped) = load_sources(&sources_or_default(&a.sources));
    let cmp = compare(series, &bin);
    write_summary(&mut stdout().lock(), &cmp, &skipped)?;
    if cmp.is_plottable() {
        Ok(())
    } else {
        Err(GraphError::EmptyData)
    }
}

/// Pretty-print available color names + an example hex code.
pub fn colors() {
    println!("\nPossible colors:");
    println!("{}", colorize(&AnsiCode::red(), "red"));
    println!("{}", colorize(&AnsiCode::green(), "green"));
    println!("{}", colorize(&AnsiCode::yellow(), "yellow"));
    println!("{}", colorize(&AnsiCode::blue(), "blue"));
    println!("{}", colorize(&AnsiCode::magenta(), "magenta"));
    println!("{}", colorize(&AnsiCode::cyan(), "cyan"));
    println!("{}", colorize(&AnsiCode::white(), "white"));
    println!(
        "{}",
        colorize(&AnsiCode::industrial_orange(), "orange | industrial")
    );
    println!(
        "{}  (#505050 or any other #RRGGBB)\n",
        colorize(&AnsiCode::rgb(0x50, 0x50, 0x50), "#505050")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "prime-timeline";
    println!(
        "
Example invocations
-------------------
• Default algorithm files : {bin} plot
• Explicit sources        : {bin} plot \"Sieve of Atkin=runs/atkin.csv\" runs/trial_division.csv
• Fixed bucket width      : {bin} plot --bin-width 0.5
• Coarser auto width      : {bin} plot --target-points 500
• Save to a file          : {bin} plot --output prime_comparison.txt --no-color
• Export the series       : {bin} plot --export cumulative.csv
• Recolor one series      : {bin} plot --style \"Miller-Rabin=#6048c1\"
• Binning summary only    : {bin} summary
• Debug timings           : {bin} plot --debug
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate::Series, core::config::BinConfig};

    #[test]
    fn summary_table() {
        let cmp = compare(
            vec![
                Series::new("Trial Division", vec![0.05, 0.3, 0.99, 1.5, 1.5, 3.0]),
                Series::new("Sieve of Atkin", vec![]),
            ],
            &BinConfig {
                bin_width: Some(1.0),
                ..BinConfig::default()
            },
        );
        let mut out = Vec::new();
        write_summary(&mut out, &cmp, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Trial Division"));
        assert!(lines[1].ends_with("ok"));
        assert!(lines[1].contains("1.000"));
        assert!(lines[2].ends_with("empty"));
    }
}
