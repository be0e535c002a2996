use serde::Serialize;

/// Which child a player can walk into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// A room of the mansion. Children are owned by their parent, so the whole
/// map is dropped together with its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    clue: Option<String>,
    left: Option<Box<Room>>,
    right: Option<Box<Room>>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clue: None,
            left: None,
            right: None,
        }
    }

    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = Some(clue.into());
        self
    }

    pub fn with_left(mut self, room: Room) -> Self {
        self.left = Some(Box::new(room));
        self
    }

    pub fn with_right(mut self, room: Room) -> Self {
        self.right = Some(Box::new(room));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue left in this room. An empty string counts as no clue.
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref().filter(|c| !c.is_empty())
    }

    pub fn child(&self, direction: Direction) -> Option<&Room> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Directions that lead somewhere from here, left first.
    pub fn exits(&self) -> Vec<Direction> {
        [Direction::Left, Direction::Right]
            .into_iter()
            .filter(|&d| self.child(d).is_some())
            .collect()
    }

    pub fn room_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(room) = stack.pop() {
            count += 1;
            stack.extend(room.left.as_deref());
            stack.extend(room.right.as_deref());
        }
        count
    }

    /// Number of rooms on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((room, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [room.left.as_deref(), room.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Every non-empty clue in the map, in pre-order.
    pub fn clues(&self) -> Vec<&str> {
        let mut clues = Vec::new();
        let mut stack = vec![self];
        while let Some(room) = stack.pop() {
            clues.extend(room.clue());
            stack.extend(room.right.as_deref());
            stack.extend(room.left.as_deref());
        }
        clues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Room {
        Room::new("Hall")
            .with_left(
                Room::new("Biblioteca")
                    .with_clue("Bilhete rasgado")
                    .with_left(Room::new("Jardim")),
            )
            .with_right(Room::new("Cozinha").with_clue(""))
    }

    #[test]
    fn leaf_iff_no_children() {
        let map = sample();
        assert!(!map.is_leaf());
        assert!(map.child(Direction::Right).unwrap().is_leaf());
        let library = map.child(Direction::Left).unwrap();
        assert!(!library.is_leaf());
        assert_eq!(library.exits(), vec![Direction::Left]);
    }

    #[test]
    fn empty_clue_is_no_clue() {
        let map = sample();
        assert_eq!(map.clue(), None);
        assert_eq!(map.child(Direction::Right).unwrap().clue(), None);
        assert_eq!(map.child(Direction::Left).unwrap().clue(), Some("Bilhete rasgado"));
    }

    #[test]
    fn counts_rooms_and_depth() {
        let map = sample();
        assert_eq!(map.room_count(), 4);
        assert_eq!(map.depth(), 3);
        assert_eq!(map.clues(), vec!["Bilhete rasgado"]);
    }
}
