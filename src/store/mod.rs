use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::docstore::DocumentStore;
use crate::error::StoreError;

pub mod seed;
pub mod types;

use types::{Achievement, ContentField, EntityRecord, Goal, SiteContent, Skill, Testimonial};

pub const SITE_CONTENT_COLLECTION: &str = "site_content";
pub const SITE_CONTENT_KEY: &str = "main";

/// The five flat collections mirrored by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Achievements,
    Skills,
    Hobbies,
    Goals,
    Testimonials,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Achievements => "achievements",
            Self::Skills => "skills",
            Self::Hobbies => "hobbies",
            Self::Goals => "goals",
            Self::Testimonials => "testimonials",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "achievements" => Some(Self::Achievements),
            "skills" => Some(Self::Skills),
            "hobbies" => Some(Self::Hobbies),
            "goals" => Some(Self::Goals),
            "testimonials" => Some(Self::Testimonials),
            _ => None,
        }
    }
}

/// Everything the site renders, assembled by [`EntityStore::load`].
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub content: SiteContent,
    pub achievements: Vec<Achievement>,
    pub skills: Vec<Skill>,
    pub hobbies: Vec<Skill>,
    pub goals: Vec<Goal>,
    pub testimonials: Vec<Testimonial>,
}

fn achievements_slot(snapshot: &mut Snapshot) -> &mut Vec<Achievement> {
    &mut snapshot.achievements
}

fn skills_slot(snapshot: &mut Snapshot) -> &mut Vec<Skill> {
    &mut snapshot.skills
}

fn hobbies_slot(snapshot: &mut Snapshot) -> &mut Vec<Skill> {
    &mut snapshot.hobbies
}

fn goals_slot(snapshot: &mut Snapshot) -> &mut Vec<Goal> {
    &mut snapshot.goals
}

fn testimonials_slot(snapshot: &mut Snapshot) -> &mut Vec<Testimonial> {
    &mut snapshot.testimonials
}

fn to_doc<T: EntityRecord>(record: &T) -> Result<Value, StoreError> {
    let mut doc = serde_json::to_value(record)?;
    if let Some(obj) = doc.as_object_mut() {
        obj.remove("id");
    }
    Ok(doc)
}

fn from_doc<T: EntityRecord>(id: String, doc: Value) -> Result<T, StoreError> {
    let mut record: T = serde_json::from_value(doc)?;
    record.set_id(id);
    Ok(record)
}

/// Local cache of all entity collections plus the content singleton, mirrored
/// to the remote document store.
///
/// Mutations follow the optimistic discipline the site was built around: the
/// snapshot changes first and the remote write follows, with failures logged
/// and swallowed rather than rolled back. Creation is the one pessimistic
/// exception, because the store-assigned identifier is what makes a record
/// addressable at all.
pub struct EntityStore {
    docs: Arc<dyn DocumentStore>,
    snapshot: RwLock<Option<Snapshot>>,
    // Serializes concurrent load() calls so racing first requests cannot
    // both observe an empty collection and seed it twice.
    load_gate: tokio::sync::Mutex<()>,
}

impl EntityStore {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs,
            snapshot: RwLock::new(None),
            load_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Fetches the content singleton and every collection in parallel,
    /// seeding empty collections from the first-run defaults. The in-memory
    /// snapshot is replaced only when every read succeeds; one failing read
    /// fails the whole load and leaves the previous snapshot in place.
    pub async fn load(&self) -> Result<Snapshot, StoreError> {
        let _gate = self.load_gate.lock().await;
        let (content, achievements, skills, hobbies, goals, testimonials) = tokio::try_join!(
            self.fetch_content(),
            self.fetch_or_seed(Collection::Achievements, seed::achievements()),
            self.fetch_or_seed(Collection::Skills, seed::skills()),
            self.fetch_or_seed(Collection::Hobbies, seed::hobbies()),
            self.fetch_or_seed(Collection::Goals, seed::goals()),
            self.fetch_or_seed(Collection::Testimonials, seed::testimonials()),
        )?;
        let snapshot = Snapshot {
            content,
            achievements,
            skills,
            hobbies,
            goals,
            testimonials,
        };
        *self.snapshot.write() = Some(snapshot.clone());
        Ok(snapshot)
    }

    async fn fetch_content(&self) -> Result<SiteContent, StoreError> {
        match self
            .docs
            .get(SITE_CONTENT_COLLECTION, SITE_CONTENT_KEY)
            .await?
        {
            Some(doc) => Ok(serde_json::from_value(doc)?),
            None => {
                let content = seed::default_content();
                self.docs
                    .set(
                        SITE_CONTENT_COLLECTION,
                        SITE_CONTENT_KEY,
                        serde_json::to_value(&content)?,
                    )
                    .await?;
                Ok(content)
            }
        }
    }

    async fn fetch_or_seed<T: EntityRecord>(
        &self,
        collection: Collection,
        seed: Vec<T>,
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.docs.list(collection.as_str()).await?;
        if docs.is_empty() && !seed.is_empty() {
            let payload = seed
                .iter()
                .map(to_doc)
                .collect::<Result<Vec<_>, _>>()?;
            let ids = self.docs.create_batch(collection.as_str(), payload).await?;
            Ok(seed
                .into_iter()
                .zip(ids)
                .map(|(mut record, id)| {
                    record.set_id(id);
                    record
                })
                .collect())
        } else {
            docs.into_iter()
                .map(|(id, doc)| from_doc(id, doc))
                .collect()
        }
    }

    /// Optimistic: the local value changes immediately; a failed remote write
    /// is logged and swallowed, leaving the caches divergent until the next
    /// full load.
    pub async fn update_content(
        &self,
        field: ContentField,
        value: String,
    ) -> Result<(), StoreError> {
        {
            let mut guard = self.snapshot.write();
            let snapshot = guard.as_mut().ok_or(StoreError::NotLoaded)?;
            snapshot.content.set(field, value.clone());
        }
        let mut fields = Map::new();
        fields.insert(field.as_str().to_string(), Value::String(value));
        if let Err(e) = self
            .docs
            .update_fields(SITE_CONTENT_COLLECTION, SITE_CONTENT_KEY, fields)
            .await
        {
            warn!(field = field.as_str(), error = %e, "content update was not persisted");
        }
        Ok(())
    }

    /// Pessimistic: the record is appended locally only after the remote
    /// create assigned it an identifier. Returns the id-bearing record.
    pub async fn add_entity(
        &self,
        collection: Collection,
        record: Value,
    ) -> Result<Value, StoreError> {
        match collection {
            Collection::Achievements => self.add_in(collection, record, achievements_slot).await,
            Collection::Skills => self.add_in(collection, record, skills_slot).await,
            Collection::Hobbies => self.add_in(collection, record, hobbies_slot).await,
            Collection::Goals => self.add_in(collection, record, goals_slot).await,
            Collection::Testimonials => self.add_in(collection, record, testimonials_slot).await,
        }
    }

    /// Applies one field change to the matching local record, then issues the
    /// partial remote update. Unknown fields and out-of-range values are
    /// rejected before anything changes; a failed remote write is only
    /// logged.
    pub async fn update_entity(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        match collection {
            Collection::Achievements => {
                self.update_in(collection, id, field, value, achievements_slot)
                    .await
            }
            Collection::Skills => {
                self.update_in(collection, id, field, value, skills_slot)
                    .await
            }
            Collection::Hobbies => {
                self.update_in(collection, id, field, value, hobbies_slot)
                    .await
            }
            Collection::Goals => {
                self.update_in(collection, id, field, value, goals_slot)
                    .await
            }
            Collection::Testimonials => {
                self.update_in(collection, id, field, value, testimonials_slot)
                    .await
            }
        }
    }

    /// Optimistic removal; a failed remote delete leaves the record gone
    /// locally but still present remotely until the next full load.
    pub async fn remove_entity(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        match collection {
            Collection::Achievements => self.remove_in(collection, id, achievements_slot).await,
            Collection::Skills => self.remove_in(collection, id, skills_slot).await,
            Collection::Hobbies => self.remove_in(collection, id, hobbies_slot).await,
            Collection::Goals => self.remove_in(collection, id, goals_slot).await,
            Collection::Testimonials => self.remove_in(collection, id, testimonials_slot).await,
        }
    }

    async fn add_in<T: EntityRecord>(
        &self,
        collection: Collection,
        record: Value,
        slot: fn(&mut Snapshot) -> &mut Vec<T>,
    ) -> Result<Value, StoreError> {
        if self.snapshot.read().is_none() {
            return Err(StoreError::NotLoaded);
        }
        let mut entity: T = from_doc(String::new(), record)?;
        let id = self.docs.create(collection.as_str(), to_doc(&entity)?).await?;
        entity.set_id(id);
        {
            let mut guard = self.snapshot.write();
            let snapshot = guard.as_mut().ok_or(StoreError::NotLoaded)?;
            slot(snapshot).push(entity.clone());
        }
        Ok(serde_json::to_value(&entity)?)
    }

    async fn update_in<T: EntityRecord>(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
        slot: fn(&mut Snapshot) -> &mut Vec<T>,
    ) -> Result<(), StoreError> {
        if field == "id" {
            return Err(StoreError::ImmutableId {
                collection: collection.as_str(),
            });
        }
        {
            let mut guard = self.snapshot.write();
            let snapshot = guard.as_mut().ok_or(StoreError::NotLoaded)?;
            let record = slot(snapshot)
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.as_str(),
                    id: id.to_string(),
                })?;
            let mut doc = serde_json::to_value(&*record)?;
            if let Value::Object(obj) = &mut doc {
                if !obj.contains_key(field) {
                    return Err(StoreError::UnknownField {
                        collection: collection.as_str(),
                        field: field.to_string(),
                    });
                }
                obj.insert(field.to_string(), value.clone());
            }
            *record = serde_json::from_value(doc)?;
        }
        let mut fields = Map::new();
        fields.insert(field.to_string(), value);
        if let Err(e) = self
            .docs
            .update_fields(collection.as_str(), id, fields)
            .await
        {
            warn!(
                collection = collection.as_str(),
                id,
                field,
                error = %e,
                "entity update was not persisted"
            );
        }
        Ok(())
    }

    async fn remove_in<T: EntityRecord>(
        &self,
        collection: Collection,
        id: &str,
        slot: fn(&mut Snapshot) -> &mut Vec<T>,
    ) -> Result<(), StoreError> {
        {
            let mut guard = self.snapshot.write();
            let snapshot = guard.as_mut().ok_or(StoreError::NotLoaded)?;
            slot(snapshot).retain(|record| record.id() != id);
        }
        if let Err(e) = self.docs.delete(collection.as_str(), id).await {
            warn!(
                collection = collection.as_str(),
                id,
                error = %e,
                "entity delete was not persisted"
            );
        }
        Ok(())
    }
}
