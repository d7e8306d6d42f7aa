use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{Board, Command, Direction, Event};
use snake_world::{self as world, query, World};

#[test]
fn identical_seeds_replay_identically() {
    let script = steering_script();
    let first = replay(7, &script);
    let second = replay(7, &script);

    assert_eq!(first, second, "world replay diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
    let advances = first
        .events
        .iter()
        .filter(|event| matches!(event, Event::SnakeAdvanced { .. }))
        .count();
    let ticks = script
        .iter()
        .filter(|command| **command == Command::Tick)
        .count();
    assert_eq!(advances, ticks, "every tick should advance the snake exactly once");
}

#[test]
fn invariants_hold_over_a_long_random_walk() {
    let mut world = World::new(Board::STANDARD, 1234).expect("standard board");
    let mut events = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0x9e37_79b9);

    for tick in 0..5_000 {
        if tick % 4 == 0 {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            world::apply(&mut world, Command::RequestDirection { direction }, &mut events)
                .expect("requests never fail");
        }

        world::apply(&mut world, Command::Tick, &mut events).expect("tick succeeds");

        let board = query::board(&world);
        let snake = query::snake(&world);
        let food = query::food(&world).position();
        assert!(snake.positions().len() <= snake.length());
        assert!(snake.positions().iter().all(|cell| board.contains(*cell)));
        assert!(board.contains(food));
        assert!(
            !snake.positions().contains(&food),
            "food overlapped the body on tick {tick}"
        );
        assert!(!snake.check_self_collision(), "collision survived tick {tick}");
    }
}

fn replay(seed: u64, script: &[Command]) -> ReplayOutcome {
    let mut world = World::new(Board::STANDARD, seed).expect("standard board");
    let mut events = Vec::new();

    for command in script {
        world::apply(&mut world, *command, &mut events).expect("command succeeds");
    }

    ReplayOutcome { events }
}

fn steering_script() -> Vec<Command> {
    let turns = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];
    let mut script = Vec::new();
    for round in 0..40 {
        script.push(Command::RequestDirection {
            direction: turns[round % turns.len()],
        });
        for _ in 0..(round % 7 + 1) {
            script.push(Command::Tick);
        }
    }
    script
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.events.len().hash(&mut hasher);
        for event in &self.events {
            event.hash(&mut hasher);
        }
        hasher.finish()
    }
}
