//! Flat prompt rendering for `/api/generate`.

use pcore::Message;

/// Render the conversation as role-labelled lines, one blank line
/// between turns, terminated by an open assistant cue so the backend
/// continues from the assistant's turn.
pub(crate) fn render(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(message.role.label());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push_str("\n\n");
    }
    prompt.push_str("Assistant: ");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_roles_in_order() {
        let messages = [
            Message::system("Use the page."),
            Message::user("What is it about?"),
            Message::assistant("A walrus."),
            Message::user("Tell me more."),
        ];
        assert_eq!(
            render(&messages),
            "System: Use the page.\n\n\
             User: What is it about?\n\n\
             Assistant: A walrus.\n\n\
             User: Tell me more.\n\n\
             Assistant: "
        );
    }

    #[test]
    fn empty_conversation_is_just_the_cue() {
        assert_eq!(render(&[]), "Assistant: ");
    }
}
