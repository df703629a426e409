//! Canned discussion lines keyed by role and profile.
//!
//! Wolves speak as villagers would; nobody announces their role.

use rand::seq::IndexedRandom;

use crate::ai::DecisionRng;
use crate::domain::participant::Profile;
use crate::domain::roles::Role;

const FALLBACK: &str = "I have nothing to add yet.";

fn lines(role: Role, profile: Profile) -> &'static [&'static str] {
    match (role, profile) {
        (Role::Wolf | Role::AwakenedWolf, Profile::Aggressive) => &[
            "I'm certain one of the quiet ones is a wolf. Let's push them.",
            "Stop stalling. We vote someone out today.",
        ],
        (Role::Wolf | Role::AwakenedWolf, Profile::Cautious) => &[
            "I'm just a villager, I don't want to rush anyone.",
            "Let's listen a bit more before we decide.",
        ],
        (Role::Wolf | Role::AwakenedWolf, Profile::Strategic) => &[
            "Look at who voted together yesterday. That pattern matters.",
            "We should spread suspicion evenly until someone slips.",
        ],
        (Role::Wolf | Role::AwakenedWolf, Profile::Baseline) => &[
            "Hard to say. Anyone could be a wolf.",
            "I'll go with the table on this one.",
        ],
        (Role::Seer, Profile::Aggressive) => &[
            "I have strong information. Trust me on this vote.",
            "Someone here is lying and I can prove it.",
        ],
        (Role::Seer, Profile::Cautious) => &[
            "I have a hunch but I'd rather not say too much.",
            "Keep an eye on the people who avoid questions.",
        ],
        (Role::Seer, Profile::Strategic) => &[
            "Let's compare everyone's votes so far before we commit.",
            "I'll share what I know when it can swing the vote.",
        ],
        (Role::Witch, Profile::Aggressive) => &[
            "Last night was close. Whoever pushed that kill should worry.",
            "I'm not afraid to act if I have to.",
        ],
        (Role::Witch, Profile::Cautious) => &[
            "Let's not waste today on a random vote.",
            "I'd like to hear from the people who've been silent.",
        ],
        (Role::Hunter, _) => &[
            "If I go down, I'm taking someone with me.",
            "Vote me out and you'll regret it.",
        ],
        (Role::Guard, Profile::Strategic | Profile::Cautious) => &[
            "The loud voices are the ones the wolves will target.",
            "Let's keep our most useful people safe.",
        ],
        (_, Profile::Aggressive) => &[
            "Someone here is hiding something. Speak up.",
            "I say we vote for whoever stays silent.",
        ],
        (_, Profile::Cautious) => &[
            "I'm not sure yet. Let's hear everyone first.",
            "I don't want to vote out an innocent.",
        ],
        (_, Profile::Strategic) => &[
            "Who benefited from last night? Start there.",
            "Look at the vote history, it tells a story.",
        ],
        (_, Profile::Baseline) => &[
            "Anyone have a lead?",
            "I'm still thinking.",
        ],
    }
}

/// A line for a synthetic participant's daytime turn.
pub fn line_for(role: Role, profile: Profile, rng: &mut DecisionRng) -> &'static str {
    lines(role, profile).choose(rng).copied().unwrap_or(FALLBACK)
}
