#![allow(dead_code)]

use base64::Engine;
use hearthstone_decks::deck::decoder::DECK_CODE_ENGINE;
use hearthstone_decks::CardRecord;
use serde_json::json;

pub fn push_varint(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Deck layout written field by field, the way the game client lays it out.
pub struct DeckBytes {
    pub reserved: u8,
    pub version: u8,
    pub format: u8,
    pub heroes: Vec<u32>,
    pub singles: Vec<u32>,
    pub doubles: Vec<u32>,
    pub multiples: Vec<(u32, u32)>,
}

impl Default for DeckBytes {
    fn default() -> Self {
        Self {
            reserved: 0,
            version: 1,
            format: 2,
            heroes: Vec::new(),
            singles: Vec::new(),
            doubles: Vec::new(),
            multiples: Vec::new(),
        }
    }
}

impl DeckBytes {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.reserved, self.version, self.format];
        for list in [&self.heroes, &self.singles, &self.doubles] {
            push_varint(&mut out, list.len() as u32);
            for &id in list.iter() {
                push_varint(&mut out, id);
            }
        }
        push_varint(&mut out, self.multiples.len() as u32);
        for &(id, count) in &self.multiples {
            push_varint(&mut out, id);
            push_varint(&mut out, count);
        }
        out
    }

    pub fn to_code(&self) -> String {
        encode(&self.to_bytes())
    }
}

pub fn encode(bytes: &[u8]) -> String {
    DECK_CODE_ENGINE.encode(bytes)
}

pub fn card(id: &str, dbf_id: u32, name: &str, cost: u32, rarity: &str, card_type: &str, class: &str) -> CardRecord {
    serde_json::from_value(json!({
        "id": id,
        "dbfId": dbf_id,
        "name": name,
        "cost": cost,
        "rarity": rarity,
        "type": card_type,
        "cardClass": class,
        "set": "CORE",
    }))
    .expect("valid card json")
}

/// A small slice of the real card list.
pub fn sample_cards() -> Vec<CardRecord> {
    let mut hero: CardRecord = serde_json::from_value(json!({
        "id": "HERO_08",
        "dbfId": 637,
        "name": "Jaina Proudmoore",
        "type": "HERO",
        "cardClass": "MAGE",
        "health": 30,
    }))
    .expect("valid hero json");
    hero.extra.insert("set".into(), json!("HERO_SKINS"));

    vec![
        hero,
        card("CS2_029", 315, "Fireball", 4, "FREE", "SPELL", "MAGE"),
        card("CS2_023", 662, "Arcane Intellect", 3, "FREE", "SPELL", "MAGE"),
        card("EX1_559", 1080, "Archmage Antonidas", 7, "LEGENDARY", "MINION", "MAGE"),
        card("EX1_116", 559, "Leeroy Jenkins", 5, "LEGENDARY", "MINION", "NEUTRAL"),
        card("CS2_032", 1004, "Flamestrike", 7, "FREE", "SPELL", "MAGE"),
        card("OG_280", 38026, "C'Thun", 10, "LEGENDARY", "MINION", "NEUTRAL"),
        card("EX1_620", 1186, "Molten Giant", 25, "EPIC", "MINION", "NEUTRAL"),
        serde_json::from_value(json!({
            "id": "GAME_005",
            "dbfId": 1746,
            "name": "The Coin",
            "type": "SPELL",
        }))
        .expect("valid coin json"),
    ]
}
