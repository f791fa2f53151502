use serde::{Deserialize, Serialize};

// ==================== GROWTH STAGE ====================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum GrowthStage {
    Egg,
    Fry,
    Juvenile,
    Adult,
    /// Stage numbers the client does not know yet; kept so one odd record
    /// does not fail a whole fetch.
    Unknown(u8),
}

impl From<u8> for GrowthStage {
    fn from(value: u8) -> Self {
        match value {
            0 => GrowthStage::Egg,
            1 => GrowthStage::Fry,
            2 => GrowthStage::Juvenile,
            3 => GrowthStage::Adult,
            other => GrowthStage::Unknown(other),
        }
    }
}

impl From<GrowthStage> for u8 {
    fn from(stage: GrowthStage) -> Self {
        match stage {
            GrowthStage::Egg => 0,
            GrowthStage::Fry => 1,
            GrowthStage::Juvenile => 2,
            GrowthStage::Adult => 3,
            GrowthStage::Unknown(other) => other,
        }
    }
}

impl GrowthStage {
    pub fn glyph(self) -> &'static str {
        match self {
            GrowthStage::Egg => "🥚",
            GrowthStage::Fry => "🐠",
            GrowthStage::Juvenile => "🐟",
            GrowthStage::Adult => "🐡",
            GrowthStage::Unknown(_) => "❓",
        }
    }
}

// ==================== FISH ====================
/// Fish as served by `GET /fishes/{address}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishRecord {
    pub id: String,
    pub name: String,
    pub growth_stage: GrowthStage,
    pub hype_level: f64,
    pub health: f64,
    pub owner: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// A record plus the kinematic state the simulator owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fish {
    #[serde(flatten)]
    pub record: FishRecord,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Fish {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn facing(&self) -> Facing {
        if self.vx > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    pub fn glyph(&self) -> &'static str {
        self.record.growth_stage.glyph()
    }

    /// One-line summary used by the snapshot logger.
    pub fn describe(&self) -> String {
        let arrow = match self.facing() {
            Facing::Right => '>',
            Facing::Left => '<',
        };
        format!(
            "{} {} {} ({:.1}, {:.1}) health={} hype={}",
            self.glyph(),
            self.record.name,
            arrow,
            self.x,
            self.y,
            self.record.health,
            self.record.hype_level
        )
    }
}
