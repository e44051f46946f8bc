use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// The closed skill vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Skill {
    Java,
    C,
    Cpp,
    ObjC,
    Swift,
    Python,
    Html,
    Javascript,
}

impl Skill {
    pub const ALL: [Skill; 8] = [
        Skill::Java,
        Skill::C,
        Skill::Cpp,
        Skill::ObjC,
        Skill::Swift,
        Skill::Python,
        Skill::Html,
        Skill::Javascript,
    ];

    /// Persisted name of the skill.
    pub fn as_str(self) -> &'static str {
        match self {
            Skill::Java => "Java",
            Skill::C => "C",
            Skill::Cpp => "C++",
            Skill::ObjC => "Obj-C",
            Skill::Swift => "Swift",
            Skill::Python => "Python",
            Skill::Html => "HTML",
            Skill::Javascript => "Javascript",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .into_iter()
            .find(|skill| skill.as_str() == s)
            .ok_or_else(|| ModelError::UnknownSkill(s.to_string()))
    }
}

/// Possession (users) or requirement (groups) flags over every [`Skill`].
///
/// Always fully populated: a fresh set maps every skill to `false`.
/// Building from external flags rejects names outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, bool>",
    into = "BTreeMap<String, bool>"
)]
pub struct SkillSet {
    flags: BTreeMap<Skill, bool>,
}

impl Default for SkillSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillSet {
    /// Creates a set with every skill flagged `false`.
    pub fn new() -> Self {
        Self {
            flags: Skill::ALL.into_iter().map(|skill| (skill, false)).collect(),
        }
    }

    /// Builds a set from name/flag pairs. Skills not mentioned stay `false`.
    pub fn from_flags<I, S>(flags: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, flag) in flags {
            let skill: Skill = name.as_ref().parse()?;
            set.flags.insert(skill, flag);
        }
        Ok(set)
    }

    pub fn add(&mut self, skill: Skill) {
        self.flags.insert(skill, true);
    }

    pub fn remove(&mut self, skill: Skill) {
        self.flags.insert(skill, false);
    }

    pub fn has(&self, skill: Skill) -> bool {
        self.flags.get(&skill).copied().unwrap_or(false)
    }

    /// Iterates over every skill and its flag, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, bool)> + '_ {
        self.flags.iter().map(|(skill, flag)| (*skill, *flag))
    }

    /// Skills flagged `true`.
    pub fn enabled(&self) -> impl Iterator<Item = Skill> + '_ {
        self.iter().filter(|(_, flag)| *flag).map(|(skill, _)| skill)
    }
}

impl TryFrom<HashMap<String, bool>> for SkillSet {
    type Error = ModelError;

    fn try_from(flags: HashMap<String, bool>) -> Result<Self, Self::Error> {
        Self::from_flags(flags)
    }
}

impl From<SkillSet> for BTreeMap<String, bool> {
    fn from(set: SkillSet) -> Self {
        set.flags
            .into_iter()
            .map(|(skill, flag)| (skill.as_str().to_string(), flag))
            .collect()
    }
}
