use log::{debug, info, warn};
use std::io;

use crate::client::framing::Frame;
use crate::client::session::Session;
use crate::protocol::{CommandStatus, handle_command, parse_command, responses};
use crate::storage::SandboxRoot;

/// Handles every complete line buffered in `session`, in arrival order.
///
/// Each response is fully written before the next line is parsed. Only
/// transport errors are returned; command failures have already been turned
/// into response text by the dispatcher.
pub async fn handle_input(root: &SandboxRoot, session: &mut Session) -> io::Result<()> {
    while let Some(frame) = session.next_frame() {
        let reply = match frame {
            Frame::Line(line) => {
                let command = parse_command(&line);
                info!("Received from {}: {:?}", session.addr(), command);

                let result = handle_command(root, session.cwd_mut(), &command);
                match &result.status {
                    CommandStatus::Success => {
                        debug!("{} from {} succeeded", command.verb.as_str(), session.addr())
                    }
                    CommandStatus::Failure(reason) => warn!(
                        "{} from {} failed: {}",
                        command.verb.as_str(),
                        session.addr(),
                        reason
                    ),
                    CommandStatus::Ignored => debug!("Ignored unknown command from {}", session.addr()),
                }
                result.message
            }
            Frame::TooLong => {
                warn!("Discarded overlong command from {}", session.addr());
                Some(responses::command_too_long().into_bytes())
            }
        };

        if let Some(bytes) = reply {
            session.send(&bytes).await?;
        }
    }
    Ok(())
}
