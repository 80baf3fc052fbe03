// tests/console_tests.rs

use contact_hub::{
    console::{Command, CommandProcessor, ParseError, parse},
    models::legacy_contact::LegacyContact,
    repository::legacy_contact::{CrudRepository, LegacyContactStore},
};

#[test]
fn store_assigns_increasing_ids() {
    let mut store = LegacyContactStore::new();

    let first = store.create(LegacyContact::new("John", "111", "john@example.com"));
    let second = store.create(LegacyContact::new("Jane", "222", "jane@example.com"));
    store.delete(second);
    let third = store.create(LegacyContact::new("Bob", "333", "bob@example.com"));

    assert_eq!((first, second, third), (1, 2, 3));
    assert_eq!(store.find_all().len(), 2);
}

#[test]
fn find_by_name_is_case_insensitive_substring() {
    let mut store = LegacyContactStore::new();
    store.create(LegacyContact::new("John", "111", "john@example.com"));
    store.create(LegacyContact::new("Bojo", "222", "bojo@example.com"));
    store.create(LegacyContact::new("Alice", "333", "alice@example.com"));

    let names: Vec<&str> = store.find_by_name("JO").iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["John", "Bojo"]);
}

#[test]
fn update_and_delete_ignore_missing_ids() {
    let mut store = LegacyContactStore::new();
    let id = store.create(LegacyContact::new("John", "111", "john@example.com"));

    store.update(LegacyContact {
        id: 99,
        name: "Nobody".to_string(),
        phone: "000".to_string(),
        email: "nobody@example.com".to_string(),
    });
    store.delete(99);

    assert_eq!(store.find_all().len(), 1);
    assert_eq!(store.read(id).unwrap().name, "John");

    store.update(LegacyContact {
        id,
        name: "Johnny".to_string(),
        phone: "112".to_string(),
        email: "johnny@example.com".to_string(),
    });
    let updated = store.read(id).unwrap();
    assert_eq!(updated.name, "Johnny");
    assert_eq!(updated.phone, "112");
}

#[test]
fn contact_display_format() {
    let contact = LegacyContact {
        id: 7,
        name: "John".to_string(),
        phone: "111".to_string(),
        email: "john@example.com".to_string(),
    };
    assert_eq!(contact.to_string(), "ID=7, Name=John, Phone=111, Email=john@example.com");
}

#[test]
fn parse_recognizes_commands() {
    assert_eq!(
        parse("ADD John 111 john@example.com"),
        Ok(Command::Add {
            name: "John".to_string(),
            phone: "111".to_string(),
            email: "john@example.com".to_string(),
        })
    );
    assert_eq!(parse("list"), Ok(Command::List));
    assert_eq!(parse("find 3"), Ok(Command::Find { id: 3 }));
    assert_eq!(parse(""), Err(ParseError::Empty));
    assert_eq!(parse("find abc"), Err(ParseError::InvalidId("abc".to_string())));
    assert_eq!(parse("add John"), Err(ParseError::Usage("add <name> <phone> <email>")));
    assert_eq!(parse("frobnicate"), Err(ParseError::Unknown("frobnicate".to_string())));
}

#[test]
fn processor_runs_a_session() {
    let mut console = CommandProcessor::default();

    assert_eq!(console.process("list"), vec!["Contact list is empty"]);
    assert_eq!(console.process("add John 111 john@example.com"), vec!["Contact added with id 1"]);
    assert_eq!(console.process("add Bojo 222 bojo@example.com"), vec!["Contact added with id 2"]);

    assert_eq!(
        console.process("find 1"),
        vec!["Contact: ID=1, Name=John, Phone=111, Email=john@example.com"]
    );
    assert_eq!(console.process("search jo").len(), 2);

    console.process("update 2 Bob 333 bob@example.com");
    assert_eq!(console.process("search jo").len(), 1);

    console.process("delete 1");
    assert_eq!(console.process("find 1"), vec!["Contact not found"]);
    assert_eq!(
        console.process("list"),
        vec!["ID=2, Name=Bob, Phone=333, Email=bob@example.com"]
    );
    assert_eq!(console.store().find_all().len(), 1);

    assert_eq!(console.process("oops"), vec!["Unknown command: oops"]);
}
