//! Example: filing mail with rules
//!
//! Registers three accounts, sets up folders and rules, sends a few mails
//! and prints where each one ended up.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=mailfiler_core=debug cargo run --package mailfiler-core --example filing_walkthrough
//! ```
//!
//! An optional JSON router configuration can be passed as the first
//! argument, e.g. `'{"naming": {"scope": "per_account"}}'`.

use std::env;

use anyhow::Context;
use mailfiler_core::{MailRouter, RouterConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailfiler_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match env::args().nth(1) {
        Some(json) => RouterConfig::from_json(&json).context("invalid router configuration")?,
        None => RouterConfig::default(),
    };
    let router = MailRouter::with_config(config);

    router.create_account("Ivan", "ivan@abv.bg")?;
    router.create_account("Pesho", "pesho@gmail.com")?;
    router.create_account("Gosho", "gosho@gmail.com")?;

    router.receive_mail(
        "Pesho",
        "sender: gosho@gmail.com\nsubject: Witcher3 tonight?\nreceived: 2022-12-08 14:14",
        "bring snacks",
    )?;

    router.create_folder("Pesho", "/inbox/gaming")?;
    router.create_folder("Pesho", "/inbox/uni")?;
    router.create_folder("Pesho", "/inbox/uni/exams")?;
    router.add_rule("Pesho", "/inbox/gaming", "subject-includes: Witcher3", 5)?;
    router.add_rule(
        "Pesho",
        "/inbox/uni/exams",
        "subject-includes: mjt\nsubject-or-body-includes: izpit",
        2,
    )?;
    router.add_rule("Pesho", "/inbox/uni", "from: ivan@abv.bg", 4)?;

    router.send_mail(
        "Ivan",
        "sender: ivan@abv.bg\nsubject: mjt\nrecipients: pesho@gmail.com, gosho@gmail.com, dean@fmi.bg",
        "izpit is on monday",
    )?;
    router.send_mail(
        "Ivan",
        "sender: ivan@abv.bg\nsubject: notes\nrecipients: pesho@gmail.com",
        "lecture notes attached",
    )?;

    for (account, folder) in [
        ("Pesho", "/inbox"),
        ("Pesho", "/inbox/gaming"),
        ("Pesho", "/inbox/uni"),
        ("Pesho", "/inbox/uni/exams"),
        ("Gosho", "/inbox"),
        ("Ivan", "/sent"),
    ] {
        let mails = router.get_mails_from_folder(account, folder)?;
        info!("{account} {folder}: {} mail(s)", mails.len());
        for mail in mails {
            println!(
                "{account}{folder}: from {} subject {:?} body {:?}",
                mail.sender,
                mail.subject.unwrap_or_default(),
                mail.body
            );
        }
    }

    for rule in router.rules("Pesho")? {
        println!("Pesho rule {} -> {}", rule.priority(), rule.folder());
    }

    Ok(())
}
