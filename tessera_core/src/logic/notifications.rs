use tessera_ecs::{Entity, Event};

/// Message shown to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessageEvent {
    pub message: String,
    pub from: Entity,
}

impl NotificationMessageEvent {
    pub fn new<S>(message: S, from: Entity) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            from,
        }
    }
}

impl Event for NotificationMessageEvent {}
