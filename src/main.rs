use ivote::config::Config;
use ivote::session::VotingSession;
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    // Load settings from the environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Starting iVote session with {:?}", config);

    let mut session = match VotingSession::with_default_questions(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to configure questions: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    if let Err(why) = session.run(&mut input, &mut output) {
        error!("Session error: {}", why);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
