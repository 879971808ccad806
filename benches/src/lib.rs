use rand::Rng;
use serde::Serialize;

use erltf::Term;

fn random_str(len: usize) -> String {
	rand::thread_rng()
		.sample_iter(&rand::distributions::Alphanumeric)
		.take(len)
		.map(char::from)
		.collect()
}

fn random_friends() -> Vec<u64> {
	(0..5).map(|_| rand::random()).collect::<Vec<u64>>()
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
	id: u64,
	name: String,
	friends: Vec<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	clan: Option<String>,
}

impl Player {
	pub fn random() -> Self {
		Self {
			id: rand::random(),
			name: random_str(12),
			friends: random_friends(),
			clan: None,
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct Presence {
	status: &'static str,
	since: u64,
	afk: bool,
	players: Vec<Player>,
}

pub fn simple() -> Player {
	Player::random()
}

pub fn complex() -> Presence {
	Presence {
		status: "online",
		since: rand::random(),
		afk: false,
		players: (0..64).map(|_| Player::random()).collect(),
	}
}

pub fn complex_term() -> Term {
	Term::map([
		("status", Term::from("online")),
		("since", Term::from(rand::random::<u64>())),
		("afk", Term::from(false)),
		(
			"players",
			Term::list((0..64).map(|_| {
				Term::map([
					("id", Term::from(rand::random::<u64>())),
					("name", Term::from(random_str(12))),
					("friends", Term::from(random_friends())),
				])
			})),
		),
	])
}
