use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use log::debug;

use super::hotel::Hotel;
use super::hotels_constants::STARTING_MONEY;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// Holds messages for whoever sits at the console until the front end shows them.
#[derive(Debug, Default, Clone)]
pub struct HumanInterface {
    inbox: Vec<String>,
}

impl HumanInterface {
    pub fn notify(&mut self, player: &str, message: &str) {
        debug!("[{}] {}", player, message);
        self.inbox.push(message.to_string());
    }

    pub fn pending(&self) -> &[String] {
        &self.inbox
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.inbox)
    }
}

/// Nobody reads an AI's messages, they only go to the log.
#[derive(Debug, Default, Clone)]
pub struct AiInterface;

impl AiInterface {
    pub fn notify(&self, player: &str, message: &str) {
        debug!("[{} (AI)] {}", player, message);
    }
}

#[derive(Debug, Clone)]
pub enum PlayerInterface {
    Human(HumanInterface),
    Ai(AiInterface),
}

impl PlayerInterface {
    fn for_kind(kind: PlayerKind) -> Self {
        match kind {
            PlayerKind::Human => PlayerInterface::Human(HumanInterface::default()),
            PlayerKind::Ai => PlayerInterface::Ai(AiInterface),
        }
    }

    pub fn kind(&self) -> PlayerKind {
        match self {
            PlayerInterface::Human(_) => PlayerKind::Human,
            PlayerInterface::Ai(_) => PlayerKind::Ai,
        }
    }

    pub fn notify(&mut self, player: &str, message: &str) {
        match self {
            PlayerInterface::Human(ui) => ui.notify(player, message),
            PlayerInterface::Ai(ui) => ui.notify(player, message),
        }
    }

    /// Drains queued messages. The AI never has any.
    pub fn take_messages(&mut self) -> Vec<String> {
        match self {
            PlayerInterface::Human(ui) => ui.take_messages(),
            PlayerInterface::Ai(_) => Vec::new(),
        }
    }
}

/// Equality and hashing only look at the name.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    ui: PlayerInterface,
    money: i64,
    // hotel names, the game owns the hotels
    properties: BTreeSet<String>,
}

impl Player {
    pub fn new(name: &str, kind: PlayerKind) -> Self {
        Self {
            name: name.to_string(),
            ui: PlayerInterface::for_kind(kind),
            money: STARTING_MONEY,
            properties: BTreeSet::new(),
        }
    }

    pub fn human(name: &str) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn ai(name: &str) -> Self {
        Self::new(name, PlayerKind::Ai)
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_ui(&self) -> &PlayerInterface {
        &self.ui
    }

    pub fn kind(&self) -> PlayerKind {
        self.ui.kind()
    }

    pub fn notify(&mut self, message: &str) {
        self.ui.notify(&self.name, message);
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        self.ui.take_messages()
    }

    pub fn get_money(&self) -> i64 {
        self.money
    }

    /// Broke means nothing left, debts included.
    pub fn is_broke(&self) -> bool {
        self.money <= 0
    }

    /// Negative amounts take money away. There is no floor.
    pub fn change_money(&mut self, amount: i64) {
        self.money += amount;
    }

    pub fn get_properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }

    pub fn owns(&self, hotel: &str) -> bool {
        self.properties.contains(hotel)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn add_property(&mut self, hotel: &Hotel) {
        self.properties.insert(hotel.get_name().to_string());
    }

    /// Removing a hotel the player does not own does nothing.
    pub fn remove_property(&mut self, hotel: &str) {
        self.properties.remove(hotel);
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            PlayerKind::Human => "Human",
            PlayerKind::Ai => "AI",
        };
        write!(f, "{} ({}): ${}", self.name, kind, self.money)?;
        if !self.properties.is_empty() {
            let properties: Vec<&str> = self.get_properties().collect();
            write!(f, " | {}", properties.join(", "))?;
        }
        Ok(())
    }
}
