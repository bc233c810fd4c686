//! `vitalwatch-monitor` -- checks patient vital signs against thresholds.
//!
//! With no arguments, runs the built-in demonstration scenarios. Otherwise
//! every argument is a `NAME=VALUE` reading and the set is evaluated once:
//!
//! ```text
//! vitalwatch-monitor temperature=98.6 pulseRate=75 spo2=97
//! ```
//!
//! Exit codes: `0` all readings in range, `2` at least one alert,
//! `1` configuration or argument error.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default     | Description                          |
//! |---------------------|----------|-------------|--------------------------------------|
//! | `THRESHOLDS_PATH`   | no       | --          | JSON threshold file                  |
//! | `ALERT_BLINK_SECS`  | no       | `12`        | Console alert animation length       |
//! | `ALERT_WEBHOOK_URL` | no       | --          | On-call webhook to page on alerts    |
//! | `EVALUATION_MODE`   | no       | `aggregate` | `aggregate` or `first-failure`       |

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalwatch_core::{AlertSink, EvaluationResult, VitalVerdict, VitalsEvaluator};
use vitalwatch_events::{
    BlinkConfig, ConsoleAlertSink, FanoutAlertSink, TracingAlertSink, WebhookAlertSink,
};
use vitalwatch_monitor::config::MonitorConfig;
use vitalwatch_monitor::readings::parse_readings;
use vitalwatch_monitor::report::render_report;
use vitalwatch_monitor::scenarios::demo_scenarios;
use vitalwatch_monitor::thresholds::load_registry;
use vitalwatch_monitor::{exit_code, EXIT_OK, EXIT_USAGE};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitalwatch_monitor=info,vitalwatch_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("vitalwatch-monitor failed: {e:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

async fn run() -> anyhow::Result<u8> {
    let config = MonitorConfig::from_env().context("Invalid configuration")?;
    let registry = load_registry(config.thresholds_path.as_deref())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let readings = parse_readings(&args).context("Invalid reading argument")?;

    // The console sink is driven after the status lines are printed, so it
    // is kept out of the evaluator's fan-out.
    let console = ConsoleAlertSink::stdout(BlinkConfig::with_duration(config.alert_blink));
    let mut sink = FanoutAlertSink::new().with(TracingAlertSink);

    let webhook = match &config.webhook_url {
        Some(url) => {
            let webhook = Arc::new(WebhookAlertSink::new(url.as_str())?);
            sink.push(Box::new(Arc::clone(&webhook)));
            Some(webhook)
        }
        None => None,
    };

    let evaluator = VitalsEvaluator::new(sink).with_mode(config.mode);

    tracing::info!(
        vitals = registry.len(),
        mode = ?evaluator.mode(),
        webhook = webhook.is_some(),
        "Starting vitalwatch-monitor",
    );

    // The demo is expected to raise alerts, so it always exits cleanly.
    let code = if readings.is_empty() {
        for (index, scenario) in demo_scenarios(&registry)?.iter().enumerate() {
            println!("--- Scenario {}: {} ---", index + 1, scenario.title);
            let result = evaluator.evaluate(&scenario.registry, &scenario.readings);
            show(&console, &result);
            println!("{}\n", "-".repeat(30));
        }
        EXIT_OK
    } else {
        let result = evaluator.evaluate(&registry, &readings);
        show(&console, &result);
        exit_code(&result)
    };

    if let Some(webhook) = webhook {
        webhook.flush().await;
    }

    Ok(code)
}

/// Print the status lines, then the alert and its animation if anything failed.
fn show(console: &ConsoleAlertSink<std::io::Stdout>, result: &EvaluationResult) {
    print!("{}", render_report(result));
    if !result.all_ok {
        let failing: Vec<VitalVerdict> = result.failures().cloned().collect();
        console.notify(&failing);
        console.wait();
    }
}
