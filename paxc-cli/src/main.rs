//! Shows the hourly passenger forecast from a running `paxc-proxy`.

pub mod errors;
pub mod source;
pub mod controller;
pub mod cards;

use clap::{Arg, App, SubCommand, AppSettings, ArgMatches};
use chrono::prelude::*;
use chrono::Duration as ChronoDuration;
use paxc_types::{DateSelector, Direction, Terminal};
use paxc_util::user_agent;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::controller::{Controller, ViewSelection, ViewState};
use crate::errors::*;
use crate::source::{PassengerSource, ProxySource};

const DEFAULT_ADDRESS: &str = "http://127.0.0.1:3000";

fn parse_arg<T>(opts: &ArgMatches, name: &str, default: T) -> Result<T> where T: std::str::FromStr<Err = String> {
    match opts.value_of(name) {
        Some(v) => v.parse().map_err(failure::err_msg),
        None => Ok(default)
    }
}

fn print_view<S: PassengerSource>(ctl: &Controller<S>) {
    let sel = ctl.selection();
    let day = Local::now().naive_local().date() + ChronoDuration::days(sel.date.offset_days());
    println!("[+] {} ({}) - {}", sel.date, day.format("%Y-%m-%d"), sel.label());
    match ctl.state() {
        ViewState::Idle | ViewState::Loading => println!("[+] Loading..."),
        ViewState::Error(msg) => println!("[!] {}", msg),
        ViewState::Loaded(_) => {
            let cards = ctl.cards();
            if cards.is_empty() {
                println!("[+] Nothing to show.");
            }
            else {
                println!("[+] {} time slots", cards.len());
                for card in cards.iter() {
                    println!("    {}", cards::render_card(card));
                }
            }
        }
    }
}

fn interactive<S: PassengerSource>(ctl: &mut Controller<S>) -> Result<()> {
    println!("[+] Commands: date <today|tomorrow>, terminal <T1|T2>, direction <entry|departure>, refresh, quit");
    print_view(ctl);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let (cmd, arg) = (words.next().unwrap_or(""), words.next().unwrap_or(""));
        let res: std::result::Result<(), String> = match cmd {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "refresh" => {
                ctl.refresh();
                Ok(())
            },
            "date" => arg.parse().map(|d: DateSelector| ctl.set_date(d)),
            "terminal" => arg.parse().map(|t: Terminal| ctl.set_terminal(t)),
            "direction" => arg.parse().map(|d: Direction| ctl.set_direction(d)),
            x => Err(format!("unknown command '{}'", x))
        };
        match res {
            Ok(()) => print_view(ctl),
            Err(e) => println!("[!] {}", e)
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let selection_args = || vec![
        Arg::with_name("date")
            .short("d")
            .long("date")
            .value_name("DATE")
            .help("Which day to show (today or tomorrow).")
            .takes_value(true),
        Arg::with_name("terminal")
            .short("t")
            .long("terminal")
            .value_name("TERMINAL")
            .help("Terminal to show (T1 or T2).")
            .takes_value(true),
        Arg::with_name("direction")
            .short("r")
            .long("direction")
            .value_name("DIRECTION")
            .help("Passenger direction (entry or departure).")
            .takes_value(true),
    ];
    let matches = App::new("paxc-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shows hourly projected passenger counts for the airport terminals.")
        .setting(AppSettings::SubcommandRequired)
        .arg(Arg::with_name("address")
             .short("a")
             .long("address")
             .value_name("URL")
             .help("Base URL of a running paxc-proxy.")
             .takes_value(true)
             .default_value(DEFAULT_ADDRESS))
        .arg(Arg::with_name("timeout")
             .long("timeout")
             .value_name("SECS")
             .help("How long to wait for the proxy.")
             .takes_value(true)
             .default_value("15"))
        .subcommand(SubCommand::with_name("show")
                    .about("Prints the forecast for one selection.")
                    .args(&selection_args()))
        .subcommand(SubCommand::with_name("interactive")
                    .about("Starts a prompt for changing the selection.")
                    .args(&selection_args()))
        .get_matches();
    let address = matches.value_of("address").unwrap_or(DEFAULT_ADDRESS);
    let timeout: u64 = matches.value_of("timeout").unwrap_or("15").parse()?;
    let (sub, opts) = match matches.subcommand() {
        (name, Some(opts)) => (name, opts),
        _ => return Err(failure::err_msg("no subcommand given"))
    };
    println!("[+] paxc-cli, using proxy at {}", address);
    let src = ProxySource::new(user_agent!(), address, Duration::from_secs(timeout))?;
    let selection = ViewSelection {
        date: parse_arg(opts, "date", DateSelector::Today)?,
        terminal: parse_arg(opts, "terminal", Terminal::T1)?,
        direction: parse_arg(opts, "direction", Direction::Entry)?
    };
    let mut ctl = Controller::with_selection(src, selection);
    ctl.mount();
    match sub {
        "show" => print_view(&ctl),
        "interactive" => interactive(&mut ctl)?,
        x => return Err(failure::err_msg(format!("unknown subcommand {}", x)))
    }
    Ok(())
}
