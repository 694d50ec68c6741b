//! Evaluate an n-cube orthogonal polynomial tree from the command line.
//!
//! ```text
//! orthotree -n 2 -p 0.5,0.5
//! orthotree -n 3 --exact -p 1/2,1/3 -p -1/4,0
//! orthotree --family jacobi --alpha 1/2 --beta 0 -s monic -n 2 -p 0.1
//! RUST_LOG=debug orthotree -n 4 -p 0.3,0.2,0.1
//! ```

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use num_rational::BigRational;

use orthotree::{
    EvaluationPoints, Family, Recurrence, Scalar, Standardization, Surd, Tree, checked_degree,
    tree_with,
};

#[derive(Parser, Debug)]
#[command(
    name = "orthotree",
    about = "Evaluate tensor-product orthogonal polynomials on the n-cube"
)]
struct Cli {
    /// Maximum total degree
    #[arg(short = 'n', long, default_value_t = 2, allow_negative_numbers = true)]
    degree: i64,

    /// Polynomial family: legendre, jacobi, chebyshev1, chebyshev2, hermite, laguerre
    #[arg(short, long, default_value = "legendre")]
    family: String,

    /// Jacobi alpha, as a rational such as 1/2
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<String>,

    /// Jacobi beta, as a rational such as -1/2
    #[arg(long, allow_negative_numbers = true)]
    beta: Option<String>,

    /// Standardization: monic, normal, classical
    #[arg(short, long, default_value = "normal")]
    standardization: String,

    /// Exact arithmetic; coordinates are parsed as rationals
    #[arg(long)]
    exact: bool,

    /// Evaluation point as comma-separated coordinates (repeatable)
    #[arg(short, long = "point", required = true, allow_negative_numbers = true)]
    points: Vec<String>,
}

fn parse_rational(text: &str) -> Result<BigRational> {
    BigRational::from_str(text.trim()).with_context(|| format!("invalid rational '{}'", text))
}

fn family(cli: &Cli) -> Result<Family> {
    if cli.family.trim().eq_ignore_ascii_case("jacobi") {
        let (Some(alpha), Some(beta)) = (&cli.alpha, &cli.beta) else {
            bail!("jacobi needs --alpha and --beta");
        };
        return Ok(Family::jacobi(parse_rational(alpha)?, parse_rational(beta)?)?);
    }
    Ok(cli.family.parse()?)
}

fn parse_points<T>(raw: &[String], parse: impl Fn(&str) -> Result<T>) -> Result<Vec<Vec<T>>> {
    raw.iter()
        .map(|point| point.split(',').map(&parse).collect::<Result<Vec<T>>>())
        .collect()
}

fn run<T: Scalar + Display>(
    cli: &Cli,
    family: Family,
    standardization: Standardization,
    points: Vec<Vec<T>>,
) -> Result<()> {
    let degree = checked_degree(cli.degree)?;
    let points = EvaluationPoints::from_points(points)?;
    let recurrence = Recurrence::<T>::new(family, standardization)?;
    info!(
        "{} ({}) in {} dimensions, {} points, degree <= {}",
        recurrence.family(),
        standardization,
        points.dim(),
        points.batch_len(),
        degree
    );

    let tree = tree_with(&points, degree, &recurrence)?;
    print_tree(&tree);
    Ok(())
}

fn print_tree<T: Display>(tree: &Tree<T>) {
    for level in tree.levels() {
        println!("degree {} ({} functions)", level.degree(), level.len());
        for (alpha, values) in level.multi_indices().iter().zip(level.entries()) {
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            println!("  {:?}: [{}]", alpha, values.join(", "));
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let family = family(&cli)?;
    let standardization: Standardization = cli.standardization.parse()?;

    if cli.exact {
        let points = parse_points(&cli.points, |text| Ok(Surd::from(parse_rational(text)?)))?;
        run(&cli, family, standardization, points)
    } else {
        let points = parse_points(&cli.points, |text| {
            text.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid coordinate '{}'", text))
        })?;
        run(&cli, family, standardization, points)
    }
}
