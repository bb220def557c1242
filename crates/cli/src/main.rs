use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pgeom::{p3, pn, Metric};
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Evaluate projective geometry kernels from the command line")]
struct Cmd {
    /// Maximum log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log: tracing::Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Geodesic distance between two homogeneous points
    Distance {
        #[arg(long, default_value = "euclidean")]
        metric: Metric,
        #[arg(long, allow_hyphen_values = true)]
        p: Coords,
        #[arg(long, allow_hyphen_values = true)]
        q: Coords,
    },
    /// Move a point a given distance towards another
    Drag {
        #[arg(long, default_value = "euclidean")]
        metric: Metric,
        #[arg(long, allow_hyphen_values = true)]
        from: Coords,
        #[arg(long, allow_hyphen_values = true)]
        towards: Coords,
        #[arg(long, allow_hyphen_values = true)]
        length: f64,
    },
    /// Polar plane of a point
    Polarize {
        #[arg(long, default_value = "euclidean")]
        metric: Metric,
        #[arg(long, allow_hyphen_values = true)]
        point: Coords,
    },
    /// Distances from a reference point for every row of a CSV with columns x,y,z,w
    Batch {
        #[arg(long, default_value = "euclidean")]
        metric: Metric,
        #[arg(long)]
        input: String,
        #[arg(long, allow_hyphen_values = true, default_value = "0,0,0,1")]
        reference: Coords,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

/// A homogeneous point given as `x,y,z,w` (or `x,y,z`, read with `w = 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
struct Coords(p3::Point3);

impl FromStr for Coords {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let vals = s
            .split(',')
            .map(|t| {
                t.trim()
                    .parse::<f64>()
                    .with_context(|| format!("bad coordinate {t:?}"))
            })
            .collect::<Result<Vec<f64>>>()?;
        match vals[..] {
            [x, y, z] => Ok(Coords([x, y, z, 1.0])),
            [x, y, z, w] => Ok(Coords([x, y, z, w])),
            _ => bail!("expected 3 or 4 comma-separated numbers, got {}", vals.len()),
        }
    }
}

#[derive(Debug, Serialize)]
struct DistanceOut {
    metric: String,
    distance: f64,
}

#[derive(Debug, Serialize)]
struct PointOut {
    metric: String,
    point: p3::Point3,
}

#[derive(Debug, Serialize)]
struct PlaneOut {
    metric: String,
    plane: p3::Plane3,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log)
        .init();
    match cmd.action {
        Action::Distance { metric, p, q } => print_json(&distance(metric, p, q)?),
        Action::Drag {
            metric,
            from,
            towards,
            length,
        } => print_json(&drag(metric, from, towards, length)?),
        Action::Polarize { metric, point } => print_json(&polarize(metric, point)?),
        Action::Batch {
            metric,
            input,
            reference,
            out,
        } => batch(metric, &input, reference, &out),
        Action::Report => report(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn distance(metric: Metric, p: Coords, q: Coords) -> Result<DistanceOut> {
    let distance = pn::distance_between(&p.0, &q.0, metric)?;
    tracing::debug!(%metric, distance, "distance");
    Ok(DistanceOut {
        metric: metric.to_string(),
        distance,
    })
}

fn drag(metric: Metric, from: Coords, towards: Coords, length: f64) -> Result<PointOut> {
    let moved = pn::drag_towards(&from.0, &towards.0, length, metric)?;
    let point: p3::Point3 = moved
        .as_slice()
        .try_into()
        .context("drag_towards returned a point of the wrong dimension")?;
    Ok(PointOut {
        metric: metric.to_string(),
        point,
    })
}

fn polarize(metric: Metric, point: Coords) -> Result<PlaneOut> {
    let plane: p3::Plane3 = pn::polarize_plane(&point.0, metric)
        .as_slice()
        .try_into()
        .context("polarize_plane returned a plane of the wrong dimension")?;
    Ok(PlaneOut {
        metric: metric.to_string(),
        plane,
    })
}

fn batch(metric: Metric, input: &str, reference: Coords, out: &str) -> Result<()> {
    tracing::info!(%metric, input, out, "batch");
    let df = LazyCsvReader::new(input)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {input}"))?
        .select(["x", "y", "z", "w"].map(|c| col(c).cast(DataType::Float64)))
        .collect()
        .with_context(|| format!("reading columns x,y,z,w from {input}"))?;

    let mut cols: Vec<Vec<f64>> = Vec::with_capacity(4);
    for name in ["x", "y", "z", "w"] {
        let ca = df.column(name)?.f64()?;
        cols.push(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect());
    }
    let distances = (0..df.height())
        .map(|i| {
            let p = [cols[0][i], cols[1][i], cols[2][i], cols[3][i]];
            pn::distance_between(&p, &reference.0, metric)
        })
        .collect::<pgeom::Result<Vec<f64>>>()?;
    tracing::info!(rows = distances.len(), "distances computed");

    let [xs, ys, zs, ws]: [Vec<f64>; 4] = cols
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected four coordinate columns"))?;
    let mut table = df!(
        "x" => xs,
        "y" => ys,
        "z" => zs,
        "w" => ws,
        "distance" => distances
    )?;

    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file =
        std::fs::File::create(out_path).with_context(|| format!("creating {out}"))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut table)?;

    let record = provenance::RunRecord::new(metric, reference.0)
        .with_input(input)
        .with_rows(table.height())
        .write_beside(out_path)?;
    tracing::info!(provenance = %record.display(), "wrote outputs");
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": pgeom::VERSION,
        "metrics": Metric::ALL.map(|m| m.to_string()),
        "params": {},
        "outputs": []
    });
    print_json(&obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn coords_parse_three_or_four_components() {
        assert_eq!("1,2,3".parse::<Coords>().unwrap(), Coords([1.0, 2.0, 3.0, 1.0]));
        assert_eq!(
            " -1, 0.5,2,0 ".parse::<Coords>().unwrap(),
            Coords([-1.0, 0.5, 2.0, 0.0])
        );
        assert!("1,2".parse::<Coords>().is_err());
        assert!("1,a,3".parse::<Coords>().is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cmd = Cmd::try_parse_from([
            "cli", "--log", "debug", "drag", "--metric", "hyperbolic", "--from", "0,0,0,1",
            "--towards", "-1,0,0,1", "--length", "1",
        ])
        .unwrap();
        assert_eq!(cmd.log, tracing::Level::DEBUG);
        match cmd.action {
            Action::Drag { metric, towards, .. } => {
                assert_eq!(metric, Metric::Hyperbolic);
                assert_eq!(towards, Coords([-1.0, 0.0, 0.0, 1.0]));
            }
            _ => panic!("expected drag"),
        }
        let bad_metric = ["cli", "distance", "--metric", "flat", "--p", "0,0,0", "--q", "1,0,0"];
        assert!(Cmd::try_parse_from(bad_metric).is_err());
    }

    #[test]
    fn distance_and_drag_outputs() {
        let origin = Coords(p3::ORIGIN);
        let d = distance(Metric::Euclidean, origin, Coords([3.0, 4.0, 0.0, 1.0])).unwrap();
        assert_eq!(d.distance, 5.0);
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"metric": "euclidean", "distance": 5.0})
        );

        let moved = drag(Metric::Euclidean, origin, Coords([1.0, 0.0, 0.0, 1.0]), 2.0).unwrap();
        assert_eq!(moved.point, [2.0, 0.0, 0.0, 1.0]);

        let plane = polarize(Metric::Hyperbolic, Coords([1.0, 2.0, 3.0, 1.0])).unwrap();
        assert_eq!(plane.plane, [1.0, 2.0, 3.0, -1.0]);
    }

    #[test]
    fn batch_writes_distances_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("points.csv");
        std::fs::write(&input, "x,y,z,w\n3,4,0,1\n0,0,0,1\n2,0,0,2\n").unwrap();
        let out = dir.path().join("nested").join("dist.csv");
        batch(
            Metric::Euclidean,
            input.to_str().unwrap(),
            Coords(p3::ORIGIN),
            out.to_str().unwrap(),
        )
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x,y,z,w,distance"));
        let last: Vec<f64> = lines
            .map(|l| l.rsplit(',').next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(last, vec![5.0, 0.0, 1.0]);

        let sidecar = dir.path().join("nested").join("dist.provenance.json");
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(doc["rows"], 3);
        assert_eq!(doc["metric"], "euclidean");
        assert_eq!(doc["inputs"][0], input.to_str().unwrap());
    }

    #[test]
    fn batch_reports_missing_columns() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        std::fs::write(&input, "a,b\n1,2\n").unwrap();
        let out = dir.path().join("out.csv");
        assert!(batch(
            Metric::Elliptic,
            input.to_str().unwrap(),
            Coords(p3::ORIGIN),
            out.to_str().unwrap()
        )
        .is_err());
    }
}
