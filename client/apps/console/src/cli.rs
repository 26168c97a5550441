//! Command line parsing

use kernel::id::QuizId;

pub const USAGE: &str = "\
Usage: console <command>

Commands:
  login <email>            Log in (password is prompted)
  signup <name> <email>    Create an account (password is prompted)
  forgot <email>           Email a password reset token
  reset <email> <token>    Set a new password (password is prompted)
  logout                   Clear the saved session
  quizzes                  List available quizzes
  take <quiz-id>           Take a timed quiz
  results                  Show your results
  help                     Show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String },
    SignUp { name: String, email: String },
    Forgot { email: String },
    Reset { email: String, token: String },
    Logout,
    Quizzes,
    Take { quiz_id: QuizId },
    Results,
    Help,
}

impl Command {
    /// Parse the arguments after the program name; `None` on misuse
    pub fn parse(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let args: Vec<String> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let command = match args.as_slice() {
            [] | ["help"] | ["--help"] | ["-h"] => Command::Help,
            ["login", email] => Command::Login {
                email: email.to_string(),
            },
            ["signup", name, email] => Command::SignUp {
                name: name.to_string(),
                email: email.to_string(),
            },
            ["forgot", email] => Command::Forgot {
                email: email.to_string(),
            },
            ["reset", email, token] => Command::Reset {
                email: email.to_string(),
                token: token.to_string(),
            },
            ["logout"] => Command::Logout,
            ["quizzes"] => Command::Quizzes,
            ["take", quiz_id] => Command::Take {
                quiz_id: QuizId::parse(quiz_id).ok()?,
            },
            ["results"] => Command::Results,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Command> {
        Command::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(&[]), Some(Command::Help));
        assert_eq!(
            parse(&["login", "ada@example.com"]),
            Some(Command::Login {
                email: "ada@example.com".to_string()
            })
        );
        assert_eq!(
            parse(&["take", "quiz1"]),
            Some(Command::Take {
                quiz_id: QuizId::new("quiz1")
            })
        );
        assert_eq!(parse(&["results"]), Some(Command::Results));
    }

    #[test]
    fn test_parse_rejects_misuse() {
        assert_eq!(parse(&["login"]), None);
        assert_eq!(parse(&["take", "  "]), None);
        assert_eq!(parse(&["frobnicate"]), None);
    }
}
