//! Server-side rendering of the three panels.

use html_escape::{encode_double_quoted_attribute, encode_text};
use i2cpanel_core::panel::STOP_MEMORY_OPTIONS;
use i2cpanel_core::{Outcome, Radix, RegisterBank, Target};

use crate::form::PanelState;

const SUBMIT_ON_CHANGE: &str = r#"onchange="this.form.submit()""#;

fn select<'a>(
    name: &str,
    options: impl Iterator<Item = &'a str>,
    selected: &str,
    submit_on_change: bool,
) -> String {
    let options: String = options
        .map(|option| {
            let marker = if option == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{marker}>{}</option>"#,
                encode_double_quoted_attribute(option),
                encode_text(option)
            )
        })
        .collect();
    let on_change = if submit_on_change { SUBMIT_ON_CHANGE } else { "" };
    format!(r#"<select name="{name}" {on_change}>{options}</select>"#)
}

fn byte_select(name: &str, radix: Radix, selected: u8, submit_on_change: bool) -> String {
    let options: Vec<String> = radix.options().collect();
    select(
        name,
        options.iter().map(String::as_str),
        &radix.format(selected),
        submit_on_change,
    )
}

fn title(target: Target) -> String {
    format!(
        r#"<div class="panel-title"><h2>{}</h2></div>"#,
        target.title()
    )
}

fn outcome(state: &PanelState, target: Target) -> String {
    match &state.outcome {
        Some((shown, Outcome::Success(message))) if *shown == target => {
            format!(r#"<p class="outcome success">{}</p>"#, encode_text(message))
        }
        Some((shown, Outcome::Failure(message))) if *shown == target => {
            format!(r#"<p class="outcome error">{}</p>"#, encode_text(message))
        }
        _ => String::new(),
    }
}

fn slave_main(state: &PanelState) -> String {
    let radix_select = select(
        "radix",
        Radix::ALL.iter().map(Radix::label),
        state.radix.label(),
        true,
    );
    format!(
        r#"<section class="panel">{title}
<h3>Select Data to Send:</h3>
{radix_select}
<input type="hidden" name="shown_radix" value="{shown}">
<label>Select Data value:{values}</label>
<button type="submit" name="action" value="slave_main">Send Data</button>
{outcome}</section>"#,
        title = title(Target::SlaveMain),
        shown = state.radix.label(),
        values = byte_select("slave_main", state.radix, state.slave_main, false),
        outcome = outcome(state, Target::SlaveMain),
    )
}

fn register_bank(state: &PanelState) -> String {
    let registers: String = state
        .registers
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let n = index + 1;
            format!(
                r#"<h3>REGISTER {n}</h3>
<label>Select Data for REGISTER {n} (Binary):{}</label>
"#,
                byte_select(&format!("register_{n}"), Radix::Binary, *value, true)
            )
        })
        .collect();
    format!(
        r#"<section class="panel">{title}
{registers}<p class="bits">24-bit Binary Data: <code>{bits}</code></p>
<button type="submit" name="action" value="register_bank">Send All Registers</button>
{outcome}</section>"#,
        title = title(Target::RegisterBank),
        bits = RegisterBank::new(state.registers).bit_string(),
        outcome = outcome(state, Target::RegisterBank),
    )
}

fn stop_memory(state: &PanelState) -> String {
    format!(
        r#"<section class="panel">{title}
<label>Select Data for STOP MEMORY:{values}</label>
<button type="submit" name="action" value="stop_memory">Send Data to STOP MEMORY</button>
{outcome}</section>"#,
        title = title(Target::StopMemory),
        values = select(
            "stop_memory",
            STOP_MEMORY_OPTIONS.into_iter(),
            &Radix::Binary.format(state.stop_memory),
            false,
        ),
        outcome = outcome(state, Target::StopMemory),
    )
}

pub fn render(state: &PanelState) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>I2C Panel</title>
<link rel="stylesheet" href="/panel.css">
</head>
<body>
<form method="post" action="/">
<div class="columns">
{}
{}
{}
</div>
</form>
</body>
</html>
"#,
        slave_main(state),
        register_bank(state),
        stop_memory(state),
    )
}
