use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Env};
use huectl::bridge::{Bridge, DISCOVERY_URL};
use huectl::brightness::Transform;
use huectl::config::Config;
use huectl::light::LightCommand;
use huectl::table;
use log::{error, Level};
use std::io::Write;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: Option<&str> = option_env!("HUECTL_COMMIT");
const BUILD_DATE: Option<&str> = option_env!("HUECTL_BUILD_DATE");

/// huectl controls a Philips Hue installation
#[derive(Parser, Debug)]
#[command(name = "huectl")]
struct Opts {
    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to a bridge and store the new user in the config. The link
    /// button must be pressed before running this command.
    Connect,
    /// Print the version of huectl
    Version,
    /// Manage individual lights
    #[command(visible_aliases = ["light", "l"])]
    Lights(LightsOpts),
}

#[derive(Args, Debug)]
struct LightsOpts {
    /// Comma separated light IDs to target. If empty, all lights are targeted.
    #[arg(long = "id", value_delimiter = ',', global = true)]
    ids: Vec<u32>,
    // lists the lights when omitted
    #[command(subcommand)]
    command: Option<LightsCommand>,
}

#[derive(Subcommand, Debug)]
enum LightsCommand {
    /// List available lights
    #[command(visible_alias = "ls")]
    List,
    /// Turn on lights
    On,
    /// Turn off lights
    Off,
    /// Toggle lights between on and off
    Toggle,
    /// Set the brightness
    ///
    /// Set the current brightness on a scale between 1 and 255. The inc and
    /// dec flags can be used to set the value relative to the current value.
    #[command(visible_alias = "bri")]
    Brightness(Val),
    /// Set the color of the light, using hue and saturation
    #[command(visible_alias = "col")]
    Color { hue: u16, sat: u8 },
}

#[derive(Args, Debug)]
struct Val {
    #[arg(value_parser = clap::value_parser!(u8).range(Transform::MIN as i64..))]
    value: u8,
    /// Increase the current value
    #[arg(short, long, conflicts_with = "dec")]
    inc: bool,
    /// Decrease the current value
    #[arg(short, long)]
    dec: bool,
}

/// ANSI foreground color for log records of `level`.
fn level_color(level: Level) -> u8 {
    match level {
        Level::Debug | Level::Trace => 90,
        Level::Warn => 33,
        Level::Error => 91,
        Level::Info => 39,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "\x1b[{}m{}\x1b[0m",
                level_color(record.level()),
                record.args()
            )
        })
        .init();
}

async fn connect() -> Result<()> {
    let config = huectl::pair(DISCOVERY_URL).await?;
    config.write().await.context("Unable to store config")?;
    println!("Connected to bridge at {}", config.bridge_address);
    Ok(())
}

fn version() {
    println!("Version:    {}", VERSION);
    println!("Built on:   {}", BUILD_DATE.unwrap_or("unknown"));
    println!("Commit:     {}", COMMIT.unwrap_or("none"));
}

async fn lights(opts: LightsOpts) -> Result<()> {
    let config = Config::read().await?;
    let bridge = Bridge::from_config(&config).context("Unable to set up bridge client")?;

    let cmd = match opts.command {
        None | Some(LightsCommand::List) => {
            let lights = huectl::list_lights(&bridge).await?;
            print!("{}", table::render(&lights));
            return Ok(());
        }
        Some(LightsCommand::On) => LightCommand::On,
        Some(LightsCommand::Off) => LightCommand::Off,
        Some(LightsCommand::Toggle) => LightCommand::Toggle,
        Some(LightsCommand::Brightness(Val { value, inc, dec })) => {
            LightCommand::Brightness(Transform::from_flags(value, inc, dec))
        }
        Some(LightsCommand::Color { hue, sat }) => LightCommand::Color { hue, sat },
    };
    huectl::run_light_command(&bridge, &opts.ids, cmd).await?;
    Ok(())
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Connect => connect().await,
        Command::Version => {
            version();
            Ok(())
        }
        Command::Lights(lights_opts) => lights(lights_opts).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let opts: Opts = Opts::parse();
    init_logging(opts.verbose);
    if let Err(err) = run(opts.command).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
