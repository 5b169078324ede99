//! The default adventuring party: one member of each class, equipped for
//! a first dungeon.

use skirmish_core::{
    AbilityScores, CharacterClassType, DiceError, DiceService, Party, PlayerCharacter, Weapon,
};

struct MemberSpec {
    name: &'static str,
    class: CharacterClassType,
    abilities: AbilityScores,
    armor_class: i32,
    melee: (&'static str, &'static str),
    ranged: Option<(&'static str, &'static str)>,
    spells: &'static [&'static str],
    items: &'static [&'static str],
}

const ROSTER: &[MemberSpec] = &[
    MemberSpec {
        name: "Sckricko",
        class: CharacterClassType::Fighter,
        abilities: AbilityScores {
            strength: 16,
            intelligence: 9,
            wisdom: 10,
            dexterity: 12,
            constitution: 14,
            charisma: 10,
        },
        armor_class: 4,
        melee: ("Sword", "1d8"),
        ranged: None,
        spells: &[],
        items: &["Flask of Oil"],
    },
    MemberSpec {
        name: "Eryndor",
        class: CharacterClassType::Elf,
        abilities: AbilityScores {
            strength: 13,
            intelligence: 15,
            wisdom: 10,
            dexterity: 16,
            constitution: 10,
            charisma: 12,
        },
        armor_class: 5,
        melee: ("Sword", "1d8"),
        ranged: Some(("Long Bow", "1d6")),
        spells: &["magic_missile", "sleep"],
        items: &[],
    },
    MemberSpec {
        name: "Wilbur",
        class: CharacterClassType::Cleric,
        abilities: AbilityScores {
            strength: 12,
            intelligence: 10,
            wisdom: 16,
            dexterity: 9,
            constitution: 13,
            charisma: 11,
        },
        armor_class: 4,
        melee: ("Mace", "1d6"),
        ranged: None,
        spells: &["cure_light_wounds", "hold_person", "bless"],
        items: &["Holy Water"],
    },
    MemberSpec {
        name: "Thorfin",
        class: CharacterClassType::Dwarf,
        abilities: AbilityScores {
            strength: 15,
            intelligence: 10,
            wisdom: 11,
            dexterity: 10,
            constitution: 16,
            charisma: 8,
        },
        armor_class: 3,
        melee: ("Battle Axe", "1d8"),
        ranged: None,
        spells: &[],
        items: &["Flask of Oil"],
    },
    MemberSpec {
        name: "Slick",
        class: CharacterClassType::Thief,
        abilities: AbilityScores {
            strength: 10,
            intelligence: 12,
            wisdom: 9,
            dexterity: 17,
            constitution: 11,
            charisma: 13,
        },
        armor_class: 6,
        melee: ("Dagger", "1d4"),
        ranged: Some(("Sling", "1d4")),
        spells: &[],
        items: &[],
    },
    MemberSpec {
        name: "Merry",
        class: CharacterClassType::Halfling,
        abilities: AbilityScores {
            strength: 11,
            intelligence: 10,
            wisdom: 12,
            dexterity: 16,
            constitution: 12,
            charisma: 14,
        },
        armor_class: 5,
        melee: ("Short Sword", "1d6"),
        ranged: None,
        spells: &[],
        items: &[],
    },
    MemberSpec {
        name: "Mazpar",
        class: CharacterClassType::MagicUser,
        abilities: AbilityScores {
            strength: 8,
            intelligence: 17,
            wisdom: 12,
            dexterity: 11,
            constitution: 10,
            charisma: 10,
        },
        armor_class: 9,
        melee: ("Dagger", "1d4"),
        ranged: None,
        spells: &["magic_missile", "sleep", "shield"],
        items: &[],
    },
];

/// Build the standard seven-member first-level party, hit points rolled
/// through the supplied dice service.
pub fn default_party(dice: &dyn DiceService) -> Result<Party, DiceError> {
    let mut party = Party::new("Default Party");
    for spec in ROSTER {
        let mut pc = PlayerCharacter::new(spec.name, spec.class, 1, spec.abilities, dice)?;
        pc.set_armor_class(spec.armor_class);
        pc.equip_melee_weapon(Weapon::new(spec.melee.0, spec.melee.1));
        if let Some((name, die)) = spec.ranged {
            pc.equip_ranged_weapon(Weapon::new(name, die));
        }
        for spell in spec.spells {
            pc.learn_spell(spell);
        }
        for item in spec.items {
            pc.add_item(item);
        }
        party.add(pc);
    }
    Ok(party)
}
