use std::io::{BufRead, Write};

use sheha_lib::config::{BANNER_SUBTITLE, BANNER_TITLE};
use sheha_lib::embedding::Embed;
use sheha_lib::llm::Generate;
use sheha_lib::output::ConsoleIO;
use sheha_lib::pipeline::turn::Chatbot;
use sheha_lib::runtime::Runtime;
use sheha_lib::session::Session;
use tracing::info;

use super::start;

const INPUT_PROMPT: &str = "> ";

/// Run the `sheha chat` command.
pub fn run_chat_cmd<IN, OUT, ERR>(
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let startup = start(runtime)?;
    let mut chatbot = Chatbot::new(&startup.knowledge, startup.embedder, startup.generator);
    run_chat(&mut chatbot, io)?;
    Ok(())
}

/// Read one query per line until EOF, `exit`, or `quit`, answering each.
///
/// Blank lines are skipped. Returns the finished session.
pub fn run_chat<E, G, IN, OUT, ERR>(
    chatbot: &mut Chatbot<'_, E, G>,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<Session>
where
    E: Embed,
    G: Generate,
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    writeln!(io.stdout(), "{BANNER_TITLE}\n{BANNER_SUBTITLE}\n")?;

    let mut session = Session::new();
    let mut line = String::new();
    loop {
        write!(io.stderr(), "{INPUT_PROMPT}")?;
        io.stderr().flush()?;

        line.clear();
        if io.stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit(input) {
            break;
        }

        writeln!(io.stderr(), "Thinking...")?;
        let reply = chatbot.handle_turn(&mut session, input);
        writeln!(io.stdout(), "{}\n", reply.content)?;
    }

    info!(turns = session.turns(), "Chat session ended");
    Ok(session)
}

fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

#[cfg(test)]
mod tests {
    use sheha_lib::corpus::{CorpusRow, KnowledgeBase};
    use sheha_lib::output::BufferedIO;
    use sheha_lib::test_util::{HashEmbedder, ScriptedGenerator};

    use super::*;
    use crate::test_util::runtime_without_api_key;

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::build(
            vec![CorpusRow::new("What is your name?", "Amrutha")],
            &mut HashEmbedder::new(),
        )
        .unwrap()
    }

    #[test]
    fn answers_each_line_until_eof() {
        let kb = knowledge();
        let generator = ScriptedGenerator::replying("I'm Amrutha!");
        let mut chatbot = Chatbot::new(&kb, HashEmbedder::new(), &generator);
        let mut io = BufferedIO::with_stdin_lines(&["What is your name?", "", "   ", "Who are you?"]);

        let session = run_chat(&mut chatbot, &mut io).unwrap();

        assert_eq!(session.len(), 4);
        assert_eq!(generator.calls(), 2);
        assert_eq!(
            io.stdout_to_string(),
            "Perumalla Naga Vidya Amrutha Chatbot\n\
             Ask me anything, and I'll respond as myself, Amrutha.\n\n\
             *Sheha*:\nI'm Amrutha!\n\n\
             *Sheha*:\nI'm Amrutha!\n\n"
        );
        assert_eq!(
            io.stderr_to_string(),
            "> Thinking...\n> > > Thinking...\n> "
        );
    }

    #[test]
    fn exit_and_quit_end_the_session() {
        for word in ["exit", "QUIT", "  Exit  "] {
            let kb = knowledge();
            let generator = ScriptedGenerator::replying("unused");
            let mut chatbot = Chatbot::new(&kb, HashEmbedder::new(), &generator);
            let mut io = BufferedIO::with_stdin_lines(&[word, "What is your name?"]);

            let session = run_chat(&mut chatbot, &mut io).unwrap();

            assert!(session.is_empty(), "{word:?} did not end the chat");
            assert_eq!(generator.calls(), 0);
        }
    }

    #[test]
    fn failed_turns_keep_the_loop_running() {
        let kb = knowledge();
        let generator = ScriptedGenerator::replying("Still here");
        let mut chatbot = Chatbot::new(&kb, HashEmbedder::failing("embedder offline"), &generator);
        let mut io = BufferedIO::with_stdin_lines(&["first", "second"]);

        let session = run_chat(&mut chatbot, &mut io).unwrap();

        assert_eq!(session.len(), 4);
        assert!(
            io.stdout_to_string()
                .ends_with("An error occurred: embedder offline\n\nAn error occurred: embedder offline\n\n")
        );
    }

    #[test]
    fn missing_api_key_fails_before_loading() {
        let (_tmp, runtime) = runtime_without_api_key();
        let mut io = BufferedIO::with_stdin_lines(&["What is your name?"]);

        let err = run_chat_cmd(&runtime, &mut io).unwrap_err();

        assert_eq!(
            err.to_string(),
            "missing required environment variable: GEMINI_API_KEY"
        );
        assert_eq!(io.stdout_to_string(), "");
    }
}
