//! Integration tests for the mail router.
//!
//! These drive [`MailRouter`] through its public operations only.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use mailfiler_core::{Error, MailRouter, NameScope, PriorityOrder, RouterConfig};

const IVAN: &str = "ivan@abv.bg";
const PESHO: &str = "pesho@gmail.com";
const GOSHO: &str = "gosho@gmail.com";

fn router() -> MailRouter {
    let router = MailRouter::new();
    router.create_account("Ivan", IVAN).unwrap();
    router.create_account("Pesho", PESHO).unwrap();
    router.create_account("Gosho", GOSHO).unwrap();
    router
}

fn bodies(router: &MailRouter, account: &str, folder: &str) -> Vec<String> {
    let mut bodies: Vec<_> = router
        .get_mails_from_folder(account, folder)
        .unwrap()
        .into_iter()
        .map(|mail| mail.body)
        .collect();
    bodies.sort();
    bodies
}

#[test]
fn new_account_has_empty_default_folders() {
    let router = router();
    assert!(router.get_mails_from_folder("Ivan", "/inbox").unwrap().is_empty());
    assert!(router.get_mails_from_folder("Ivan", "/sent").unwrap().is_empty());
    assert!(router.folders("Ivan", "/inbox").unwrap().is_empty());
}

#[test]
fn duplicate_accounts_rejected() {
    let router = router();
    assert!(matches!(
        router.create_account("Ivan", "other@abv.bg"),
        Err(Error::DuplicateAccount(_))
    ));
    assert!(matches!(
        router.create_account("Other", IVAN),
        Err(Error::DuplicateAccount(_))
    ));
    assert_eq!(router.account("Ivan").unwrap().email(), IVAN);
}

#[test]
fn blank_arguments_rejected() {
    let router = router();
    assert!(matches!(
        router.create_account(" ", "x@y.z"),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        router.create_folder("Ivan", ""),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        router.receive_mail("Ivan", "sender: a@b.c", "  "),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        router.add_rule("Ivan", "/inbox", "from: a@b.c", 0),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        router.add_rule("Ivan", "/inbox", "from: a@b.c", 11),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn unknown_account_rejected() {
    let router = router();
    assert!(matches!(
        router.create_folder("Nobody", "/inbox/x"),
        Err(Error::AccountNotFound(_))
    ));
    assert!(matches!(
        router.receive_mail("Nobody", "sender: a@b.c", "hi"),
        Err(Error::AccountNotFound(_))
    ));
    assert!(matches!(
        router.get_mails_from_folder("Nobody", "/inbox"),
        Err(Error::AccountNotFound(_))
    ));
}

#[test]
fn folder_paths_validated() {
    let router = router();
    for path in ["sent/ivan", "inbox/gaming", "/inbox2", "/sent/ivan", "/gaming"] {
        assert!(
            matches!(router.create_folder("Ivan", path), Err(Error::InvalidPath(_))),
            "{path}"
        );
    }
    assert!(matches!(
        router.create_folder("Ivan", "/inbox/a/b"),
        Err(Error::PathNotFound(_))
    ));
    assert!(matches!(
        router.create_folder("Ivan", "/inbox"),
        Err(Error::FolderAlreadyExists(_))
    ));
}

#[test]
fn nested_folders_and_duplicates() {
    let router = router();
    router.create_folder("Ivan", "/inbox/hobbies").unwrap();
    router.create_folder("Ivan", "/inbox/hobbies/gaming/").unwrap();
    assert!(matches!(
        router.create_folder("Ivan", "/inbox/hobbies/"),
        Err(Error::FolderAlreadyExists(_))
    ));

    let folders = router.folders("Ivan", "/inbox/hobbies").unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].to_string(), "/inbox/hobbies/gaming");

    // Folders belong to one account only.
    assert!(matches!(
        router.get_mails_from_folder("Pesho", "/inbox/hobbies"),
        Err(Error::FolderNotFound(_))
    ));
}

#[test]
fn missing_folder_reported_as_not_found() {
    let router = router();
    assert!(matches!(
        router.add_rule("Ivan", "/inbox/nope", "from: a@b.c", 1),
        Err(Error::FolderNotFound(_))
    ));
    assert!(matches!(
        router.add_rule("Ivan", "/inbox/nope/deeper", "from: a@b.c", 1),
        Err(Error::FolderNotFound(_))
    ));
    assert!(matches!(
        router.get_mails_from_folder("Ivan", "inbox"),
        Err(Error::FolderNotFound(_))
    ));
    assert!(matches!(
        router.get_mails_from_folder("Ivan", "/"),
        Err(Error::FolderNotFound(_))
    ));
}

#[test]
fn received_mail_without_rules_lands_in_inbox() {
    let router = router();
    router
        .receive_mail(
            "Ivan",
            "sender: pesho@gmail.com\nsubject: Hello\nrecipients: ivan@abv.bg\nreceived: 2022-12-08 14:14",
            "How are you?",
        )
        .unwrap();

    let mails = router.get_mails_from_folder("Ivan", "/inbox").unwrap();
    assert_eq!(mails.len(), 1);
    let mail = &mails[0];
    assert_eq!(mail.sender.name(), "Pesho");
    assert_eq!(mail.sender.email(), PESHO);
    assert_eq!(mail.subject.as_deref(), Some("Hello"));
    assert!(mail.recipients.contains(IVAN));
    assert_eq!(mail.body, "How are you?");
    assert_eq!(
        mail.received_at.unwrap().format("%Y-%m-%d %H:%M").to_string(),
        "2022-12-08 14:14"
    );
}

#[test]
fn mail_without_sender_rejected() {
    let router = router();
    assert!(matches!(
        router.receive_mail("Ivan", "subject: no sender", "body"),
        Err(Error::Definition(_))
    ));
}

#[test]
fn unregistered_sender_fails_lookup() {
    let router = router();
    router
        .receive_mail("Ivan", "sender: stranger@x.com", "hello")
        .unwrap();
    assert!(matches!(
        router.get_mails_from_folder("Ivan", "/inbox"),
        Err(Error::AccountNotFound(_))
    ));
}

#[test]
fn lower_priority_number_wins_by_default() {
    let router = router();
    router.create_folder("Ivan", "/inbox/low").unwrap();
    router.create_folder("Ivan", "/inbox/high").unwrap();
    router
        .add_rule("Ivan", "/inbox/low", "subject-includes: mjt", 7)
        .unwrap();
    router
        .add_rule("Ivan", "/inbox/high", "subject-includes: mjt", 3)
        .unwrap();

    router
        .receive_mail("Ivan", "sender: pesho@gmail.com\nsubject: mjt exam", "see you")
        .unwrap();

    assert_eq!(bodies(&router, "Ivan", "/inbox/high"), ["see you"]);
    assert!(bodies(&router, "Ivan", "/inbox/low").is_empty());

    let priorities: Vec<_> = router
        .rules("Ivan")
        .unwrap()
        .iter()
        .map(|rule| rule.priority().get())
        .collect();
    assert_eq!(priorities, [3, 7]);
}

#[test]
fn descending_order_prefers_higher_numbers() {
    let config = RouterConfig {
        priority_order: PriorityOrder::Descending,
        ..RouterConfig::default()
    };
    let router = MailRouter::with_config(config);
    router.create_account("Ivan", IVAN).unwrap();
    router.create_account("Pesho", PESHO).unwrap();
    router.create_folder("Ivan", "/inbox/low").unwrap();
    router.create_folder("Ivan", "/inbox/high").unwrap();
    router
        .add_rule("Ivan", "/inbox/high", "subject-includes: mjt", 3)
        .unwrap();
    router
        .add_rule("Ivan", "/inbox/low", "subject-includes: mjt", 7)
        .unwrap();

    router
        .receive_mail("Ivan", "sender: pesho@gmail.com\nsubject: mjt", "x")
        .unwrap();
    assert_eq!(bodies(&router, "Ivan", "/inbox/low"), ["x"]);
}

#[test]
fn adding_rule_refiles_inbox() {
    let router = router();
    router
        .receive_mail(
            "Ivan",
            "sender: pesho@gmail.com\nsubject: Witcher3 is out",
            "buy it",
        )
        .unwrap();
    router
        .receive_mail("Ivan", "sender: pesho@gmail.com\nsubject: lunch?", "pizza")
        .unwrap();
    router.create_folder("Ivan", "/inbox/gaming").unwrap();
    router
        .add_rule("Ivan", "/inbox/gaming", "subject-includes: Witcher3", 5)
        .unwrap();

    assert_eq!(bodies(&router, "Ivan", "/inbox/gaming"), ["buy it"]);
    assert_eq!(bodies(&router, "Ivan", "/inbox"), ["pizza"]);
}

#[test]
fn refiling_only_touches_inbox_itself() {
    let router = router();
    router.create_folder("Ivan", "/inbox/a").unwrap();
    router.create_folder("Ivan", "/inbox/b").unwrap();
    router
        .add_rule("Ivan", "/inbox/a", "from: pesho@gmail.com", 1)
        .unwrap();
    router
        .receive_mail("Ivan", "sender: pesho@gmail.com\nsubject: hi", "one")
        .unwrap();

    router
        .add_rule("Ivan", "/inbox/b", "subject-includes: hi", 2)
        .unwrap();
    assert_eq!(bodies(&router, "Ivan", "/inbox/a"), ["one"]);
    assert!(bodies(&router, "Ivan", "/inbox/b").is_empty());
}

#[test]
fn conflicting_rule_rejected_without_side_effects() {
    let router = router();
    router.create_folder("Ivan", "/inbox/a").unwrap();
    router.create_folder("Ivan", "/inbox/b").unwrap();
    router
        .add_rule("Ivan", "/inbox/a", "subject-includes: mjt", 4)
        .unwrap();
    router
        .receive_mail("Ivan", "sender: pesho@gmail.com\nsubject: other", "stay")
        .unwrap();

    assert!(matches!(
        router.add_rule("Ivan", "/inbox/b", "subject-includes: mjt", 4),
        Err(Error::ConflictingRule { .. })
    ));
    assert_eq!(router.rules("Ivan").unwrap().len(), 1);

    // Same predicate at another priority is fine.
    router
        .add_rule("Ivan", "/inbox/b", "subject-includes: mjt", 5)
        .unwrap();
    assert_eq!(router.rules("Ivan").unwrap().len(), 2);
    assert_eq!(bodies(&router, "Ivan", "/inbox"), ["stay"]);
}

#[test]
fn malformed_rule_definition_rejected() {
    let router = router();
    router.create_folder("Ivan", "/inbox/a").unwrap();
    assert!(matches!(
        router.add_rule("Ivan", "/inbox/a", "from: a@b.c\nfrom: d@e.f", 1),
        Err(Error::Definition(_))
    ));
    assert!(router.rules("Ivan").unwrap().is_empty());
}

#[test]
fn send_stores_copy_and_fans_out() {
    let router = router();
    router.create_folder("Gosho", "/inbox/friends").unwrap();
    router
        .add_rule("Gosho", "/inbox/friends", "from: ivan@abv.bg", 2)
        .unwrap();

    router
        .send_mail(
            "Ivan",
            "sender: ivan@abv.bg\nsubject: party\nrecipients: pesho@gmail.com, gosho@gmail.com, unregistered@x.com",
            "come over",
        )
        .unwrap();

    assert_eq!(bodies(&router, "Ivan", "/sent"), ["come over"]);
    assert_eq!(bodies(&router, "Pesho", "/inbox"), ["come over"]);
    assert_eq!(bodies(&router, "Gosho", "/inbox/friends"), ["come over"]);
    assert!(bodies(&router, "Gosho", "/inbox").is_empty());
    assert!(bodies(&router, "Ivan", "/inbox").is_empty());

    let sent = router.get_mails_from_folder("Ivan", "/sent").unwrap();
    assert_eq!(sent[0].sender.name(), "Ivan");
    assert_eq!(sent[0].recipients.len(), 3);
}

#[test]
fn send_without_recipients_only_stores_copy() {
    let router = router();
    router
        .send_mail("Ivan", "sender: ivan@abv.bg\nsubject: note to self", "remember")
        .unwrap();
    assert_eq!(bodies(&router, "Ivan", "/sent"), ["remember"]);
    assert!(bodies(&router, "Pesho", "/inbox").is_empty());
}

#[test]
fn send_with_foreign_sender_rejected() {
    let router = router();
    assert!(matches!(
        router.send_mail(
            "Ivan",
            "sender: pesho@gmail.com\nrecipients: gosho@gmail.com",
            "spoofed"
        ),
        Err(Error::AccountNotFound(_))
    ));
    assert!(bodies(&router, "Ivan", "/sent").is_empty());
    assert!(bodies(&router, "Gosho", "/inbox").is_empty());
}

#[test]
fn per_account_names_from_config() {
    let config = RouterConfig::from_json(r#"{"naming": {"scope": "per_account"}}"#).unwrap();
    assert_eq!(config.naming.scope, NameScope::PerAccount);

    let router = MailRouter::with_config(config);
    router.create_account("Ivan", IVAN).unwrap();
    router.create_account("Pesho", PESHO).unwrap();
    router
        .send_mail("Ivan", "sender: ivan@abv.bg\nrecipients: pesho@gmail.com", "a")
        .unwrap();
    router
        .send_mail("Ivan", "sender: ivan@abv.bg\nrecipients: pesho@gmail.com", "b")
        .unwrap();

    assert_eq!(bodies(&router, "Pesho", "/inbox"), ["a", "b"]);
    assert_eq!(bodies(&router, "Ivan", "/sent"), ["a", "b"]);
}

#[test]
fn concurrent_senders_lose_no_mail() {
    let router = Arc::new(MailRouter::new());
    router.create_account("Hub", "hub@x.com").unwrap();
    for i in 0..4 {
        router
            .create_account(&format!("user{i}"), &format!("user{i}@x.com"))
            .unwrap();
    }
    router.create_folder("Hub", "/inbox/odd").unwrap();
    router
        .add_rule("Hub", "/inbox/odd", "subject-includes: odd", 1)
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for n in 0..25 {
                    let parity = if n % 2 == 0 { "even" } else { "odd" };
                    let definition =
                        format!("sender: user{i}@x.com\nsubject: {parity}\nrecipients: hub@x.com");
                    router
                        .send_mail(&format!("user{i}"), &definition, &format!("{i}-{n}"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(router.get_mails_from_folder("Hub", "/inbox").unwrap().len(), 52);
    assert_eq!(router.get_mails_from_folder("Hub", "/inbox/odd").unwrap().len(), 48);
    for i in 0..4 {
        assert_eq!(
            router.get_mails_from_folder(&format!("user{i}"), "/sent").unwrap().len(),
            25
        );
    }
}
