use clap::{Parser, ValueEnum};

use mitli_rs::converter::{Converter, ConverterConfig};
use mitli_rs::formula::{FormulaArena, FormulaId};
use mitli_rs::interval::Interval;
use mitli_rs::types::Horizon;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Preset {
    /// G[1,2] a
    Globally,
    /// F[0,1] a
    Eventually,
    /// (a U[0,2] b)
    Until,
    /// (a S[1,2] b)
    Since,
    /// G[0,inf] (req -> F[1,3] ack)
    Response,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula to translate.
    #[arg(value_enum, default_value = "response")]
    preset: Preset,

    /// Last tick of the bounded horizon.
    #[arg(long, value_name = "INT", default_value = "5", allow_negative_numbers = true)]
    horizon: i64,

    /// Prefix of fresh theta symbols.
    #[arg(long, default_value = "theta")]
    namespace: String,

    /// Print the formula tree in DOT format.
    #[arg(long)]
    dot: bool,
}

fn build(arena: &mut FormulaArena, preset: Preset) -> mitli_rs::error::Result<FormulaId> {
    let a = arena.atom("a");
    let b = arena.atom("b");
    match preset {
        Preset::Globally => arena.globally(Interval::new(1, 2)?, a),
        Preset::Eventually => arena.eventually(Interval::new(0, 1)?, a),
        Preset::Until => arena.until(Interval::new(0, 2)?, a, b),
        Preset::Since => arena.since(Interval::new(1, 2)?, a, b),
        Preset::Response => {
            let req = arena.atom("req");
            let ack = arena.atom("ack");
            let eventually_ack = arena.eventually(Interval::new(1, 3)?, ack)?;
            let response = arena.implies(req, eventually_ack)?;
            arena.globally(Interval::unbounded(0), response)
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let horizon = Horizon::try_from(args.horizon)?;

    let mut arena = FormulaArena::new();
    let root = build(&mut arena, args.preset)?;
    println!("formula = {}", arena.display(root));

    if args.dot {
        println!("{}", arena.to_dot(&[root])?);
    }

    let config = ConverterConfig {
        namespace: args.namespace,
    };
    let mut converter = Converter::with_config(&arena, root, horizon.last(), &config)?;
    converter.apply();

    for constraint in converter.constraints()? {
        println!("{}", constraint);
    }

    let top = converter.thetas(root)?;
    println!(
        "top = {}",
        top.iter().map(|lit| lit.to_string()).collect::<Vec<_>>().join(", ")
    );
    println!("stats = {:?}", converter.stats());

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
