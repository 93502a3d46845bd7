use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::{
    error::NotifyError,
    queue::{NotificationId, NotificationsOptions, Queue},
};

pub const DEFAULT_BUS_CAPACITY: usize = 256;

/// Requests delivered to queues over the notification bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(NotificationsOptions),
    Close(NotificationId),
    Click(NotificationId),
    Pause(NotificationId),
    Resume(NotificationId),
}

/// Sending half of the notification bus.
///
/// Every subscribed queue sees every command; queues drop requests addressed
/// to another group themselves.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Command>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

impl Notifier {
    /// Create a bus buffering up to `capacity` commands per lagging queue.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receiver to hand to [`Queue::run`].
    pub fn subscribe(&self) -> broadcast::Receiver<Command> {
        self.sender.subscribe()
    }

    /// Send a command. Returns how many queues will receive it.
    pub fn send(&self, command: Command) -> Result<usize, NotifyError> {
        self.sender.send(command).map_err(|_| NotifyError::Closed)
    }

    pub fn notify(&self, request: impl Into<NotificationsOptions>) -> Result<usize, NotifyError> {
        self.send(Command::Add(request.into()))
    }

    pub fn close(&self, id: impl Into<NotificationId>) -> Result<usize, NotifyError> {
        self.send(Command::Close(id.into()))
    }

    /// Clear every queue of the default group.
    pub fn clear(&self) -> Result<usize, NotifyError> {
        self.notify(NotificationsOptions::clear())
    }
}

impl Queue {
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Add(request) => {
                self.add_item(request);
            }
            Command::Close(id) => {
                self.destroy_by_id(&id);
            }
            Command::Click(id) => {
                self.click(&id);
            }
            Command::Pause(id) => {
                self.pause(&id);
            }
            Command::Resume(id) => {
                self.resume(&id);
            }
        }
    }

    /// Serve bus commands and timer expiries until every [`Notifier`] is gone.
    pub async fn run(&mut self, mut commands: broadcast::Receiver<Command>) {
        let timers = self.timer_events();
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Ok(command) => self.apply(command),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "notification queue fell behind the bus");
                    }
                    Err(RecvError::Closed) => {
                        debug!("notification bus closed, stopping queue");
                        break;
                    }
                },
                Ok(event) = timers.recv() => {
                    self.handle_timer_event(event);
                }
            }
        }
    }
}
