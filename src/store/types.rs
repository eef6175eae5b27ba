use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The site-wide content singleton, stored as one document under a fixed key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub hero_name: String,
    pub hero_role: String,
    pub about_text: String,
    pub contact_email: String,
}

/// Fields of [`SiteContent`] addressable by the field-granular update API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    HeroName,
    HeroRole,
    AboutText,
    ContactEmail,
}

impl ContentField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeroName => "heroName",
            Self::HeroRole => "heroRole",
            Self::AboutText => "aboutText",
            Self::ContactEmail => "contactEmail",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "heroName" => Some(Self::HeroName),
            "heroRole" => Some(Self::HeroRole),
            "aboutText" => Some(Self::AboutText),
            "contactEmail" => Some(Self::ContactEmail),
            _ => None,
        }
    }
}

impl SiteContent {
    pub fn set(&mut self, field: ContentField, value: String) {
        match field {
            ContentField::HeroName => self.hero_name = value,
            ContentField::HeroRole => self.hero_role = value,
            ContentField::AboutText => self.about_text = value,
            ContentField::ContactEmail => self.contact_email = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Academic,
    Personal,
    Volunteering,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: String,
    pub category: AchievementCategory,
    pub image: String,
}

/// Closed icon set the skill cards can reference. Unknown names stored by
/// older clients resolve to the explicit default `Star` instead of failing
/// the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IconName {
    Zap,
    Brain,
    Briefcase,
    Sword,
    Footprints,
    Star,
    Activity,
    TrendingUp,
    TrendingDown,
    Lightbulb,
    Globe,
    Cpu,
}

impl IconName {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Zap" => Self::Zap,
            "Brain" => Self::Brain,
            "Briefcase" => Self::Briefcase,
            "Sword" => Self::Sword,
            "Footprints" => Self::Footprints,
            "Star" => Self::Star,
            "Activity" => Self::Activity,
            "TrendingUp" => Self::TrendingUp,
            "TrendingDown" => Self::TrendingDown,
            "Lightbulb" => Self::Lightbulb,
            "Globe" => Self::Globe,
            "Cpu" => Self::Cpu,
            _ => Self::Star,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zap => "Zap",
            Self::Brain => "Brain",
            Self::Briefcase => "Briefcase",
            Self::Sword => "Sword",
            Self::Footprints => "Footprints",
            Self::Star => "Star",
            Self::Activity => "Activity",
            Self::TrendingUp => "TrendingUp",
            Self::TrendingDown => "TrendingDown",
            Self::Lightbulb => "Lightbulb",
            Self::Globe => "Globe",
            Self::Cpu => "Cpu",
        }
    }
}

impl<'de> Deserialize<'de> for IconName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// One entry in the "skills" or "hobbies" collection; both share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub icon_name: IconName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GoalType,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub role: String,
    pub comment: String,
    pub image: String,
}

/// A record living in one of the named collections: serializable, with a
/// store-assigned identifier mapped in from the document key.
pub trait EntityRecord: Serialize + DeserializeOwned + Clone + Send {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

impl EntityRecord for Achievement {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl EntityRecord for Skill {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl EntityRecord for Goal {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl EntityRecord for Testimonial {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_icon_names_resolve_to_star() {
        let skill: Skill =
            serde_json::from_value(json!({"name": "x", "iconName": "Rocket"})).unwrap();
        assert_eq!(skill.icon_name, IconName::Star);

        let skill: Skill =
            serde_json::from_value(json!({"name": "x", "iconName": "TrendingUp"})).unwrap();
        assert_eq!(skill.icon_name, IconName::TrendingUp);
    }

    #[test]
    fn icon_names_round_trip_through_their_wire_names() {
        for name in [
            "Zap", "Brain", "Briefcase", "Sword", "Footprints", "Star", "Activity",
            "TrendingUp", "TrendingDown", "Lightbulb", "Globe", "Cpu",
        ] {
            let icon = IconName::from_name(name);
            assert_eq!(icon.as_str(), name);
            assert_eq!(serde_json::to_value(icon).unwrap(), json!(name));
        }
    }

    #[test]
    fn category_is_a_closed_enum() {
        let err = serde_json::from_value::<Achievement>(json!({
            "title": "t", "description": "d", "year": "2024",
            "category": "sports", "image": "https://example.com/a.png"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("sports"));
    }

    #[test]
    fn goal_type_uses_the_wire_name_type() {
        let goal: Goal = serde_json::from_value(json!({
            "type": "short", "title": "t", "description": "d"
        }))
        .unwrap();
        assert_eq!(goal.kind, GoalType::Short);
        assert_eq!(goal.id, "");

        let doc = serde_json::to_value(&goal).unwrap();
        assert_eq!(doc["type"], "short");
    }

    #[test]
    fn content_fields_map_to_their_document_keys() {
        for key in ["heroName", "heroRole", "aboutText", "contactEmail"] {
            assert_eq!(ContentField::from_key(key).unwrap().as_str(), key);
        }
        assert!(ContentField::from_key("favicon").is_none());
    }
}
