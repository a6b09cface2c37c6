use crate::codec::{MAX_LINE_LENGTH, TERMINATOR};
use crate::command;
use crate::error::{FrameError, Result};

/// One protocol message.
///
/// A message either carries the `raw` line it was parsed from, which
/// [`serialize`](Message::serialize) returns verbatim, or is synthesized from
/// its fields and rebuilt on the way out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// The original wire line, if parsed from one.
    pub raw: Option<String>,
    /// Nick or server name that produced the message.
    pub origin: Option<String>,
    /// User name, present only when the prefix carries `!user`.
    pub user: Option<String>,
    /// Host name, present only when the prefix carries `@host`.
    pub host: Option<String>,
    /// Verb or three-digit numeric.
    pub command: String,
    /// Arguments in order. Only the last may contain spaces.
    pub arguments: Vec<String>,
}

impl Message {
    /// Synthesize a message with no prefix.
    pub fn new<I, S>(command: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the origin of a synthesized message.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the user and host of a synthesized message.
    pub fn with_user_host(mut self, user: impl Into<String>, host: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.host = Some(host.into());
        self
    }

    /// Parse a wire line (without terminator).
    ///
    /// Parsing never fails: malformed input yields whatever fields could be
    /// recognized, and the line itself is kept as `raw`.
    pub fn parse(line: &str) -> Self {
        let mut message = Self {
            raw: Some(line.to_string()),
            ..Self::default()
        };

        let mut rest = line;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (prefix, after) = split_token(stripped);
            rest = after;
            match prefix.split_once('!') {
                Some((origin, user_host)) => {
                    message.origin = Some(origin.to_string());
                    match user_host.split_once('@') {
                        Some((user, host)) => {
                            message.user = Some(user.to_string());
                            message.host = Some(host.to_string());
                        }
                        None => message.user = Some(user_host.to_string()),
                    }
                }
                None => message.origin = Some(prefix.to_string()),
            }
        }

        let (command, mut rest) = split_token(rest);
        message.command = command.to_string();

        while !rest.is_empty() {
            if let Some(trailing) = rest.strip_prefix(':') {
                message.arguments.push(trailing.to_string());
                break;
            }
            let (argument, after) = split_token(rest);
            message.arguments.push(argument.to_string());
            rest = after;
        }

        message
    }

    /// Render the message as a wire line, without terminator.
    ///
    /// A non-empty `raw` is returned as is, minus trailing line-break
    /// characters. Fails with [`FrameError::MessageTooLong`] when the line
    /// would not fit in [`MAX_LINE_LENGTH`] bytes with its terminator; the
    /// error carries the candidate line and the number of excess bytes.
    pub fn serialize(&self) -> Result<String> {
        let line = match self.raw.as_deref() {
            Some(raw) if !raw.is_empty() => raw.trim_end_matches(['\r', '\n']).to_string(),
            _ => self.build(),
        };

        let max = MAX_LINE_LENGTH - TERMINATOR.len();
        if line.len() > max {
            let truncated = line.len() - max;
            return Err(FrameError::MessageTooLong {
                message: line,
                truncated,
            });
        }
        Ok(line)
    }

    fn build(&self) -> String {
        let mut line = String::new();
        if let Some(origin) = self.origin.as_deref().filter(|o| !o.is_empty()) {
            line.push(':');
            line.push_str(origin);
            if let Some(user) = self.user.as_deref().filter(|u| !u.is_empty()) {
                line.push('!');
                line.push_str(user);
                line.push('@');
                line.push_str(self.host.as_deref().unwrap_or_default());
            }
            line.push(' ');
        }
        line.push_str(&self.command);

        let last = self.arguments.len().saturating_sub(1);
        for (i, argument) in self.arguments.iter().enumerate() {
            line.push_str(if i == last { " :" } else { " " });
            line.push_str(argument);
        }
        line
    }

    /// The final argument, usually the free-text payload.
    pub fn last_argument(&self) -> Option<&str> {
        self.arguments.last().map(String::as_str)
    }

    /// Symbolic name of the command (`"433"` → `"ERR_NICKNAMEINUSE"`).
    pub fn command_name(&self) -> Option<&'static str> {
        command::command_name(&self.command)
    }

    /// Split an oversized message into pieces that each serialize.
    ///
    /// The last argument is cut at the byte position reported by
    /// [`serialize`](Message::serialize), backed off to a character boundary,
    /// and the remainder is sent as a further message with the same prefix,
    /// command and middle arguments. A message that already fits is returned
    /// alone. Raw messages cannot be split, nor can messages whose fixed part
    /// leaves no room for payload; both fail with the original error.
    pub fn split_to_fit(&self) -> Result<Vec<Message>> {
        let mut pieces = Vec::new();
        let mut current = self.clone();

        loop {
            let err = match current.serialize() {
                Ok(_) => {
                    pieces.push(current);
                    return Ok(pieces);
                }
                Err(err) => err,
            };

            let truncated = match &err {
                FrameError::MessageTooLong { truncated, .. } => *truncated,
                _ => return Err(err),
            };
            if current.raw.as_deref().is_some_and(|raw| !raw.is_empty()) {
                return Err(err);
            }
            let Some(payload) = current.arguments.last() else {
                return Err(err);
            };

            let mut keep = payload.len().saturating_sub(truncated);
            while keep > 0 && !payload.is_char_boundary(keep) {
                keep -= 1;
            }
            if keep == 0 {
                return Err(err);
            }

            let remainder = payload[keep..].to_string();
            let mut piece = current.clone();
            if let Some(last) = piece.arguments.last_mut() {
                last.truncate(keep);
            }
            piece.raw = None;
            pieces.push(piece);

            if let Some(last) = current.arguments.last_mut() {
                *last = remainder;
            }
        }
    }
}

/// Split at the first space, skipping the run of spaces that follows.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(' ') {
        Some(i) => (&s[..i], s[i..].trim_start_matches(' ')),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(
        raw: &str,
        origin: Option<&str>,
        user: Option<&str>,
        host: Option<&str>,
        command: &str,
        arguments: &[&str],
    ) -> Message {
        Message {
            raw: Some(raw.to_string()),
            origin: origin.map(str::to_string),
            user: user.map(str::to_string),
            host: host.map(str::to_string),
            command: command.to_string(),
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn parse_full_prefix() {
        let line = ":e!foo@bar.com JOIN #test54321";
        assert_eq!(
            Message::parse(line),
            parsed(
                line,
                Some("e"),
                Some("foo"),
                Some("bar.com"),
                "JOIN",
                &["#test54321"]
            )
        );
    }

    #[test]
    fn parse_origin_only() {
        let line = ":e JOIN #test54321";
        assert_eq!(
            Message::parse(line),
            parsed(line, Some("e"), None, None, "JOIN", &["#test54321"])
        );
    }

    #[test]
    fn parse_without_prefix() {
        let line = "JOIN #test54321";
        assert_eq!(
            Message::parse(line),
            parsed(line, None, None, None, "JOIN", &["#test54321"])
        );
    }

    #[test]
    fn parse_trailing_argument() {
        let msg = Message::parse("JOIN #test54321 :foo bar");
        assert_eq!(msg.arguments, vec!["#test54321", "foo bar"]);

        let msg = Message::parse("JOIN #test54321 ::foo bar");
        assert_eq!(msg.arguments, vec!["#test54321", ":foo bar"]);
    }

    #[test]
    fn parse_collapses_space_runs() {
        let msg = Message::parse("JOIN    #test54321    foo       bar   ");
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.arguments, vec!["#test54321", "foo", "bar"]);
    }

    #[test]
    fn parse_bare_colon_is_empty_argument() {
        let msg = Message::parse("JOIN :");
        assert_eq!(msg.arguments, vec![""]);
    }

    #[test]
    fn parse_numeric_reply() {
        let msg = Message::parse(":irc.example.net 433 * e :Nickname is already in use");
        assert_eq!(msg.origin.as_deref(), Some("irc.example.net"));
        assert_eq!(msg.command, "433");
        assert_eq!(msg.command_name(), Some("ERR_NICKNAMEINUSE"));
        assert_eq!(msg.last_argument(), Some("Nickname is already in use"));
    }

    #[test]
    fn parse_empty_line() {
        let msg = Message::parse("");
        assert_eq!(msg.command, "");
        assert!(msg.arguments.is_empty());
    }

    #[test]
    fn parse_is_pure() {
        let line = ":nick!u@h PRIVMSG #chan :hello world";
        assert_eq!(Message::parse(line), Message::parse(line));
    }

    #[test]
    fn serialize_raw_verbatim() {
        let msg = Message::parse("JOIN    #a   :x");
        assert_eq!(msg.serialize().unwrap(), "JOIN    #a   :x");

        let msg = Message {
            raw: Some("PING :x\r\n".to_string()),
            ..Message::default()
        };
        assert_eq!(msg.serialize().unwrap(), "PING :x");
    }

    #[test]
    fn serialize_synthesized() {
        let msg = Message::new("PRIVMSG", ["#chan", "hi there"]);
        assert_eq!(msg.serialize().unwrap(), "PRIVMSG #chan :hi there");

        let msg = Message::new("NICK", ["e"]).with_origin("e");
        assert_eq!(msg.serialize().unwrap(), ":e NICK :e");

        let msg = Message::new("JOIN", ["#a"])
            .with_origin("e")
            .with_user_host("foo", "bar.com");
        assert_eq!(msg.serialize().unwrap(), ":e!foo@bar.com JOIN :#a");

        let msg = Message::new("QUIT", Vec::<String>::new());
        assert_eq!(msg.serialize().unwrap(), "QUIT");

        let msg = Message::new("JOIN", [""]);
        assert_eq!(msg.serialize().unwrap(), "JOIN :");
    }

    #[test]
    fn serialize_skips_empty_origin() {
        let msg = Message::new("PING", ["x"]).with_origin("");
        assert_eq!(msg.serialize().unwrap(), "PING :x");
    }

    #[test]
    fn synthesized_round_trip() {
        let msg = Message::new("USER", ["e", "0", "*", "Ed Burns"]);
        let back = Message::parse(&msg.serialize().unwrap());
        assert_eq!(back.command, msg.command);
        assert_eq!(back.arguments, msg.arguments);
    }

    #[test]
    fn serialize_length_boundary() {
        // "PRIVMSG #c :" is 12 bytes.
        let msg = Message::new("PRIVMSG", ["#c".to_string(), "a".repeat(498)]);
        assert_eq!(msg.serialize().unwrap().len(), 510);

        let msg = Message::new("PRIVMSG", ["#c".to_string(), "a".repeat(501)]);
        match msg.serialize() {
            Err(FrameError::MessageTooLong { message, truncated }) => {
                assert_eq!(truncated, 3);
                assert_eq!(message.len(), 513);
            }
            other => panic!("expected MessageTooLong, got {other:?}"),
        }
    }

    #[test]
    fn serialize_rejects_oversized_raw() {
        let msg = Message::parse(&"a".repeat(511));
        assert!(matches!(
            msg.serialize(),
            Err(FrameError::MessageTooLong { truncated: 1, .. })
        ));
    }

    #[test]
    fn split_to_fit_returns_fitting_message() {
        let msg = Message::new("PRIVMSG", ["#c", "short"]);
        assert_eq!(msg.split_to_fit().unwrap(), vec![msg]);
    }

    #[test]
    fn split_to_fit_splits_payload() {
        let payload = "a".repeat(600);
        let msg = Message::new("PRIVMSG", ["#c".to_string(), payload.clone()]);
        let pieces = msg.split_to_fit().unwrap();

        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].serialize().unwrap().len(), 510);
        let joined: String = pieces
            .iter()
            .filter_map(|p| p.last_argument())
            .collect();
        assert_eq!(joined, payload);
        assert!(pieces.iter().all(|p| p.arguments[0] == "#c"));
    }

    #[test]
    fn split_to_fit_respects_char_boundaries() {
        let payload = "é".repeat(300);
        let msg = Message::new("PRIVMSG", ["#c".to_string(), payload.clone()]);
        let pieces = msg.split_to_fit().unwrap();

        let joined: String = pieces
            .iter()
            .filter_map(|p| p.last_argument())
            .collect();
        assert_eq!(joined, payload);
        assert!(pieces.iter().all(|p| p.serialize().is_ok()));
    }

    #[test]
    fn split_to_fit_rejects_raw_and_unsplittable() {
        let raw = Message::parse(&format!("PRIVMSG #c :{}", "a".repeat(600)));
        assert!(raw.split_to_fit().is_err());

        let msg = Message::new("PRIVMSG", ["#".repeat(520), "x".to_string()]);
        assert!(matches!(
            msg.split_to_fit(),
            Err(FrameError::MessageTooLong { .. })
        ));
    }
}
