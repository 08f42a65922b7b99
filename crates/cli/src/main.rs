//! g560led CLI: command-line lighting control for Logitech G560 and G203.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use g560led_core::params::{
    BRIGHTNESS_DEFAULT, BRIGHTNESS_MAX, BRIGHTNESS_MIN, RATE_DEFAULT, RATE_MAX, RATE_MIN,
};
use g560led_core::usb::RusbBus;
use g560led_core::{DeviceModel, LedController, Mode};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn mode_help() -> String {
    let mut help = String::from("Modes:\n");
    for mode in Mode::ALL {
        help.push_str(&format!("  {:<41}{}\n", mode.usage(), mode.description()));
    }
    help.push_str(&format!(
        "\nArguments:\n  \
         color       RRGGBB hex value or a color name\n  \
         rate        {RATE_MIN}-{RATE_MAX} (milliseconds, default {RATE_DEFAULT})\n  \
         brightness  {BRIGHTNESS_MIN}-{BRIGHTNESS_MAX} (percent, default {BRIGHTNESS_DEFAULT})"
    ));
    help
}

#[derive(Parser)]
#[command(
    name = "g560led",
    version,
    about = "RGB lighting control for Logitech G560 speakers and G203 mice"
)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the lighting of a G203 mouse.
    #[command(after_help = mode_help())]
    G203(LightingArgs),
    /// Set the lighting of a G560 speaker set (all four zones).
    #[command(after_help = mode_help())]
    G560(LightingArgs),
    /// List supported devices.
    Models {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct LightingArgs {
    /// Lighting mode: solid, cycle, breathe or intro.
    mode: String,

    /// Mode arguments (color, rate, brightness, or on/off).
    #[arg(num_args = 0..=3, value_name = "ARG")]
    args: Vec<String>,

    /// Print the reports that would be sent without touching the device.
    #[arg(long)]
    dry_run: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn set_lighting(model: DeviceModel, args: &LightingArgs) -> Result<()> {
    let controller = LedController::new(model);
    let mode_args: Vec<&str> = args.args.iter().map(String::as_str).collect();
    debug!(
        model = model.id(),
        mode = %args.mode,
        args = ?mode_args,
        dry_run = args.dry_run,
        "Setting lighting"
    );

    if args.dry_run {
        let commands = controller.plan(&args.mode, &mode_args)?;
        for command in &commands {
            println!("{command}");
        }
        return Ok(());
    }

    let bus = RusbBus::new()?;
    let sent = controller
        .apply(&bus, &args.mode, &mode_args)
        .with_context(|| format!("{model}: {} failed", args.mode))?;
    info!(model = model.id(), transfers = sent, "Done");
    println!("{model}: {} applied ({sent} report(s))", args.mode);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::G203(args) => set_lighting(DeviceModel::G203, args)?,
        Commands::G560(args) => set_lighting(DeviceModel::G560, args)?,
        Commands::Models { json } => {
            let summaries: Vec<_> = DeviceModel::ALL.iter().map(|m| m.summary()).collect();
            if *json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for s in &summaries {
                    let products: Vec<String> = s
                        .products
                        .iter()
                        .map(|(pid, label)| format!("{}:{pid} {label}", s.vendor_id))
                        .collect();
                    println!(
                        "{} ({}): {}, interface {}, {} channel(s)",
                        s.name,
                        s.model.id(),
                        products.join(", "),
                        s.interface,
                        s.channels
                    );
                }
            }
        }
    }

    Ok(())
}
