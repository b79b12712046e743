//! Crate-level integration and BDD tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use dockwarden_config::Config;

use crate::command::DaemonCommand;
use crate::controller::DaemonController;
use crate::error::ControllerError;
use crate::executor::{CommandExecutor, CommandOutput};
use crate::platform::Platform;
use crate::project::JoinParameters;
use crate::state::ControllerState;


#[derive(Default)]
struct Script {
    installed: bool,
    replies: HashMap<String, String>,
    issued: Vec<String>,
}

/// Executor answering from a table of canned stdout replies.
///
/// Commands are keyed by their unredacted `program args..` rendering.
/// Unknown commands print nothing; every command fails to launch while the
/// runtime is marked as not installed.
#[derive(Clone, Default)]
struct ScriptedExecutor {
    script: Rc<RefCell<Script>>,
}

impl ScriptedExecutor {
    fn set_installed(&self, installed: bool) {
        self.script.borrow_mut().installed = installed;
    }

    fn reply(&self, command: &str, stdout: &str) {
        self.script
            .borrow_mut()
            .replies
            .insert(command.to_owned(), stdout.to_owned());
    }

    fn issued(&self) -> Vec<String> {
        self.script.borrow().issued.clone()
    }
}

fn render(command: &DaemonCommand) -> String {
    std::iter::once(command.program())
        .chain(command.args().iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

impl CommandExecutor for ScriptedExecutor {
    fn run(&self, command: &DaemonCommand) -> Result<CommandOutput, ControllerError> {
        let rendered = render(command);
        let mut script = self.script.borrow_mut();
        script.issued.push(rendered.clone());

        if !script.installed {
            return Err(ControllerError::SpawnFailed {
                program: command.program().to_owned(),
                source: Arc::new(std::io::Error::from(std::io::ErrorKind::NotFound)),
            });
        }
        if command.args() == ["-v"] {
            return Ok(CommandOutput::success("Docker version 27.0.3, build 7d4bcd8\n"));
        }
        let stdout = script.replies.get(&rendered).cloned().unwrap_or_default();
        Ok(CommandOutput::success(stdout))
    }
}

#[test]
fn end_to_end_join_leave_restart() {
    let executor = ScriptedExecutor::default();
    executor.set_installed(true);
    executor.reply(
        "docker swarm join --token SWMTKN-1-abc 10.0.0.5:2377",
        "This node joined a swarm as a worker.\n",
    );
    executor.reply("docker swarm leave", "Node left the default swarm.\n");
    let mut controller: DaemonController<ScriptedExecutor> =
        DaemonController::new(Config::default(), Platform::Posix, executor.clone());

    let joined = controller
        .run_project(JoinParameters::new("10.0.0.5", 2377, "SWMTKN-1-abc"))
        .expect("join runs");
    assert!(joined.is_success());
    let left = controller.leave(false).expect("leave runs");
    assert!(left.is_success());
    let restarted = controller.restart().expect("restart runs");
    assert!(restarted.is_success());

    assert_eq!(controller.state(), ControllerState::AvailableJoined);
    assert_eq!(
        executor.issued(),
        [
            "docker -v",
            "docker swarm join --token SWMTKN-1-abc 10.0.0.5:2377",
            "docker -v",
            "docker swarm leave",
            "docker -v",
            "systemctl stop docker",
            "systemctl start docker",
            "docker ps",
        ]
    );
}
