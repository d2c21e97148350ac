use std::io::{BufRead, Write};

use sheha_lib::embedding::Embed;
use sheha_lib::llm::Generate;
use sheha_lib::output::ConsoleIO;
use sheha_lib::pipeline::turn::Chatbot;
use sheha_lib::runtime::Runtime;
use sheha_lib::session::Session;

use super::start;

/// Run the `sheha ask` command.
pub fn run_ask_cmd<IN, OUT, ERR>(
    text: &str,
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
    ask(&mut chatbot, text, io)
}

/// Answer `text` in a fresh session and print the assistant message.
pub fn ask<E, G, IN, OUT, ERR>(
    chatbot: &mut Chatbot<'_, E, G>,
    text: &str,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    E: Embed,
    G: Generate,
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let mut session = Session::new();
    let reply = chatbot.handle_turn(&mut session, text);
    writeln!(io.stdout(), "{}", reply.content)?;
    Ok(())
}
