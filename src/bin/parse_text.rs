use anyhow::Result;
use clap::Parser as ClapParser;
use rustdp::{Parser, ParserEngine};

#[derive(ClapParser, Debug)]
#[command(name = "parse_text")]
#[command(about = "Parse a sentence and print its dependency structure")]
#[command(version)]
struct Args {
    /// Text to parse
    text: String,

    /// Engine configuration file; the built-in model is used when absent
    #[arg(short, long)]
    config: Option<String>,

    /// Print the result as JSON instead of the detail view
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => ParserEngine::from_config(path)?,
        None => ParserEngine::builtin()?,
    };

    if args.json {
        let result = engine.parse_result(&args.text)?;
        println!("{}", result.to_json_pretty());
    } else {
        print!("{}", engine.detail(&args.text)?);
    }

    Ok(())
}
