use super::command::{ConsoleCommand, ConsoleError};

#[test]
fn test_parse_blank_line() {
    assert_eq!(ConsoleCommand::parse("   "), Ok(None));
}

#[test]
fn test_parse_join_leave_quit() {
    assert_eq!(
        ConsoleCommand::parse("/join alice"),
        Ok(Some(ConsoleCommand::Join("alice".to_string())))
    );
    assert_eq!(
        ConsoleCommand::parse("/leave  bob "),
        Ok(Some(ConsoleCommand::Leave("bob".to_string())))
    );
    assert_eq!(ConsoleCommand::parse("/quit"), Ok(Some(ConsoleCommand::Quit)));
}

#[test]
fn test_parse_rejects_bad_commands() {
    assert_eq!(
        ConsoleCommand::parse("/join"),
        Err(ConsoleError::MissingUser("/join"))
    );
    assert_eq!(
        ConsoleCommand::parse("/dance now"),
        Err(ConsoleError::UnknownCommand("dance".to_string()))
    );
    assert_eq!(
        ConsoleCommand::parse("@bob"),
        Err(ConsoleError::EmptyDirect("bob".to_string()))
    );
}

#[test]
fn test_parse_direct_and_broadcast() {
    let direct = ConsoleCommand::parse("@bob see you at  noon").unwrap().unwrap();
    assert_eq!(
        direct,
        ConsoleCommand::Direct {
            recipient: "bob".to_string(),
            content: "see you at  noon".to_string(),
        }
    );

    let msg = direct.into_message("console").unwrap();
    assert!(!msg.broadcast);
    assert_eq!(msg.sender, "console");
    assert_eq!(msg.recipient, "bob");

    let msg = ConsoleCommand::parse("hello everyone")
        .unwrap()
        .unwrap()
        .into_message("console")
        .unwrap();
    assert!(msg.broadcast);
    assert_eq!(msg.content, "hello everyone");
}

#[test]
fn test_control_commands_carry_no_message() {
    assert!(ConsoleCommand::Quit.into_message("console").is_none());
    assert!(
        ConsoleCommand::Join("a".to_string())
            .into_message("console")
            .is_none()
    );
}
