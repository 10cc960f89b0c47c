use curve_expr::{Error, Expression, SampleRange};

use clap::Parser;
use log::info;

/// Evaluates an infix expression in `x` over a range of sample points and
/// prints one `x<TAB>y` line per sample, ready to feed a plotting tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The expression, e.g. "(2 * sqrt(x ^ 2) + 3 * sin(x))".
    expression: String,

    /// First sample point.
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    start: f64,

    /// Samples stop before this point.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    end: f64,

    /// Distance between sample points.
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Evaluate at this single point instead of sampling a range.
    #[arg(long, allow_hyphen_values = true)]
    at: Option<f64>,

    /// Print the postfix form of the expression and exit.
    #[arg(long)]
    postfix: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let expression = Expression::<f64>::parse(&args.expression)?;

    if args.postfix {
        println!("{}", expression.postfix());
        return Ok(());
    }

    if let Some(x) = args.at {
        println!("{}", expression.evaluate(x)?);
        return Ok(());
    }

    let range = SampleRange::new(args.start, args.end, args.step)?;
    info!(
        "sampling {} points of `{expression}` on [{}, {})",
        range.len(),
        range.start(),
        range.end()
    );
    let samples = expression.sample(&range)?;
    for (i, x) in samples.xs.iter().enumerate() {
        if samples.defined[i] {
            println!("{x}\t{}", samples.ys[i]);
        } else {
            println!("{x}\tundefined");
        }
    }
    Ok(())
}
