use clap::{Parser as ClapParser, Subcommand};
use clock12::{ClockConfig, DecodedTime, Simulation, Simulator, decode};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "clock12", version, about = "Simulate the 12-hour clock core pin by pin")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reset the core, run it for a number of clock cycles and print the time
    Run(RunArgs),
    /// List the pins of the top-level module
    Signals,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Rising edges to run after reset is released
    #[arg(long, default_value_t = 10_800)]
    cycles: u64,

    /// Rising edges to hold reset for before releasing it
    #[arg(long, default_value_t = 5)]
    reset_cycles: u64,

    /// TOML file with the clock configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edges per seconds quantum, overriding the configuration
    #[arg(long)]
    divider_wrap: Option<u32>,

    /// Write a VCD waveform to this file
    #[arg(long)]
    vcd: Option<PathBuf>,

    /// Keep rst_n low for the whole run
    #[arg(long)]
    hold_reset: bool,

    /// Drive ena low for the whole run
    #[arg(long)]
    disable: bool,

    /// Output a JSON report to stdout instead of a line of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    time_ns: u64,
    cycles: u64,
    uo_out: u8,
    uio_out: u8,
    uio_oe: u8,
    clk_div: u64,
    time: DecodedTime,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Signals => {
            let sim = Simulator::builder().build().into_diagnostic()?;
            for named in sim.named_signals() {
                println!(
                    "{:<8} {:?} {:?} width={}",
                    named.name, named.direction, named.type_kind, named.signal.width
                );
            }
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ClockConfig::load(path).into_diagnostic()?,
        None => ClockConfig::default(),
    };
    if let Some(wrap) = args.divider_wrap {
        config.divider_wrap = Some(wrap);
    }
    let period = config.clock_period_ns().into_diagnostic()?;

    let mut builder = Simulation::builder().config(config);
    if let Some(path) = &args.vcd {
        builder = builder.vcd(path);
    }
    let mut vsim = builder.build().into_diagnostic()?;
    vsim.add_clock(period, 0).into_diagnostic()?;

    let ena = vsim.signal("ena").into_diagnostic()?;
    let rst_n = vsim.signal("rst_n").into_diagnostic()?;
    let uo_out = vsim.signal("uo_out").into_diagnostic()?;
    let uio_out = vsim.signal("uio_out").into_diagnostic()?;
    let uio_oe = vsim.signal("uio_oe").into_diagnostic()?;
    let clk_div = vsim.signal("clk_div").into_diagnostic()?;

    let enabled = !args.disable;
    vsim.modify(|io| {
        io.set(ena, enabled)?;
        io.set(rst_n, false)
    })
    .into_diagnostic()?;
    vsim.run_cycles(args.reset_cycles).into_diagnostic()?;

    if !args.hold_reset {
        vsim.modify(|io| io.set(rst_n, true)).into_diagnostic()?;
    }
    vsim.run_cycles(args.cycles).into_diagnostic()?;
    log::info!("ran {} cycles, now at {} ns", vsim.cycles(), vsim.time());

    let report = Report {
        time_ns: vsim.time(),
        cycles: vsim.cycles(),
        uo_out: vsim.get(uo_out) as u8,
        uio_out: vsim.get(uio_out) as u8,
        uio_oe: vsim.get(uio_oe) as u8,
        clk_div: vsim.get(clk_div),
        time: decode(vsim.get(uo_out) as u8, vsim.get(uio_out) as u8),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else {
        println!(
            "{} after {} cycles ({} ns): uo_out=0x{:02X} uio_out=0x{:02X} uio_oe=0x{:02X} clk_div={}",
            report.time,
            report.cycles,
            report.time_ns,
            report.uo_out,
            report.uio_out,
            report.uio_oe,
            report.clk_div
        );
    }
    Ok(())
}
