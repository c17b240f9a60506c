//! Data models for the marketplace resources
//!
//! Each resource has a stored record (with the server-assigned document id)
//! and an input payload mirroring the fields a client submits on create or
//! full-document update. The `Resource` trait ties a record to its tables and
//! business identifier so the CRUD handlers can be written once and mounted
//! three times.

use chrono::{DateTime, Utc};
use redb::TableDefinition;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::database::{
    TABLE_ACCOMMODATIONS, TABLE_ACCOMMODATION_IDS, TABLE_PROFESSIONALS, TABLE_PROFESSIONAL_IDS,
    TABLE_VIEWINGS, TABLE_VIEWING_IDS,
};

/// Contract between a stored record and the generic CRUD handlers.
///
/// `NAME` is the human-facing resource name used in error messages.
/// `KEY_FIELD` names the business identifier whose uniqueness is enforced
/// through the `KEY_INDEX` table.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAME: &'static str;
    const KEY_FIELD: &'static str;
    const TABLE: TableDefinition<'static, &'static str, &'static str>;
    const KEY_INDEX: TableDefinition<'static, &'static str, &'static str>;

    type Input: DeserializeOwned + Send + 'static;

    /// Builds a fresh record from a create payload.
    fn create(id: String, input: Self::Input) -> Self;

    /// Builds the replacement record for a full-document update, keeping the
    /// document id (and any server-managed fields) from the existing record.
    fn replace(&self, input: Self::Input) -> Self;

    fn id(&self) -> &str;

    /// The business identifier rendered as an index key.
    fn unique_key(&self) -> String;
}

/// A rentable property listing
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Accommodation {
    /// Server-assigned document id
    pub id: String,
    /// Business identifier, unique across the collection
    pub residence_id: String,
    pub image1: String,
    pub image2: String,
    pub image3: String,
    pub image4: String,
    pub image5: String,
    pub image6: String,
    pub residence_type: String,
    pub description: String,
    /// Monthly rental price
    pub rentals: f64,
    pub location: String,
    pub deposit: f64,
    pub rooms: u32,
    /// Defaults to the creation time when omitted from the payload
    pub date_posted: DateTime<Utc>,
    pub owner: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub owner_address: String,
    pub owner_id: String,
}

/// Create/update payload for an accommodation
#[derive(Deserialize)]
pub struct AccommodationInput {
    pub residence_id: String,
    pub image1: String,
    pub image2: String,
    pub image3: String,
    pub image4: String,
    pub image5: String,
    pub image6: String,
    pub residence_type: String,
    pub description: String,
    pub rentals: f64,
    pub location: String,
    pub deposit: f64,
    pub rooms: u32,
    #[serde(default)]
    pub date_posted: Option<DateTime<Utc>>,
    pub owner: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub owner_address: String,
    pub owner_id: String,
}

impl Resource for Accommodation {
    const NAME: &'static str = "Accommodation";
    const KEY_FIELD: &'static str = "residence_id";
    const TABLE: TableDefinition<'static, &'static str, &'static str> = TABLE_ACCOMMODATIONS;
    const KEY_INDEX: TableDefinition<'static, &'static str, &'static str> =
        TABLE_ACCOMMODATION_IDS;

    type Input = AccommodationInput;

    fn create(id: String, input: Self::Input) -> Self {
        Self {
            id,
            residence_id: input.residence_id,
            image1: input.image1,
            image2: input.image2,
            image3: input.image3,
            image4: input.image4,
            image5: input.image5,
            image6: input.image6,
            residence_type: input.residence_type,
            description: input.description,
            rentals: input.rentals,
            location: input.location,
            deposit: input.deposit,
            rooms: input.rooms,
            date_posted: input.date_posted.unwrap_or_else(Utc::now),
            owner: input.owner,
            owner_email: input.owner_email,
            owner_phone: input.owner_phone,
            owner_address: input.owner_address,
            owner_id: input.owner_id,
        }
    }

    fn replace(&self, input: Self::Input) -> Self {
        Self::create(self.id.clone(), input)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> String {
        self.residence_id.clone()
    }
}

/// A service provider (electrician, gardener, ...) listed for hire
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Professional {
    /// Server-assigned document id
    pub id: String,
    /// Business identifier, unique across the collection
    pub professional_id: String,
    pub name: String,
    pub age: u32,
    /// Years of experience
    pub experience: u32,
    pub location: String,
    pub address: String,
    pub is_available: bool,
    pub phone_number: String,
    pub next_of_kin: String,
    pub nok_phone_number: String,
    pub email: String,
    pub skills: String,
    pub profession: String,
    pub bio: String,
    /// Server-managed timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a professional
#[derive(Deserialize)]
pub struct ProfessionalInput {
    pub professional_id: String,
    pub name: String,
    pub age: u32,
    pub experience: u32,
    pub location: String,
    pub address: String,
    pub is_available: bool,
    pub phone_number: String,
    pub next_of_kin: String,
    pub nok_phone_number: String,
    pub email: String,
    pub skills: String,
    pub profession: String,
    pub bio: String,
}

impl Resource for Professional {
    const NAME: &'static str = "Professional";
    const KEY_FIELD: &'static str = "professional_id";
    const TABLE: TableDefinition<'static, &'static str, &'static str> = TABLE_PROFESSIONALS;
    const KEY_INDEX: TableDefinition<'static, &'static str, &'static str> =
        TABLE_PROFESSIONAL_IDS;

    type Input = ProfessionalInput;

    fn create(id: String, input: Self::Input) -> Self {
        let now = Utc::now();
        Self {
            id,
            professional_id: input.professional_id,
            name: input.name,
            age: input.age,
            experience: input.experience,
            location: input.location,
            address: input.address,
            is_available: input.is_available,
            phone_number: input.phone_number,
            next_of_kin: input.next_of_kin,
            nok_phone_number: input.nok_phone_number,
            email: input.email,
            skills: input.skills,
            profession: input.profession,
            bio: input.bio,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&self, input: Self::Input) -> Self {
        let mut next = Self::create(self.id.clone(), input);
        next.created_at = self.created_at;
        next.updated_at = Utc::now();
        next
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> String {
        self.professional_id.clone()
    }
}

/// A fee-bearing request to inspect a specific accommodation
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Viewing {
    /// Server-assigned document id
    pub id: String,
    /// Document id of the referenced accommodation. Not validated on create
    /// and not cleaned up on accommodation delete, so it may dangle.
    pub residence_id: String,
    /// Business identifier, unique across the collection
    pub request_id: u64,
    pub fee: f64,
    /// Defaults to the creation time when omitted from the payload
    pub date: DateTime<Utc>,
}

/// Create/update payload for a viewing
#[derive(Deserialize)]
pub struct ViewingInput {
    pub residence_id: String,
    pub request_id: u64,
    pub fee: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Resource for Viewing {
    const NAME: &'static str = "Viewing";
    const KEY_FIELD: &'static str = "request_id";
    const TABLE: TableDefinition<'static, &'static str, &'static str> = TABLE_VIEWINGS;
    const KEY_INDEX: TableDefinition<'static, &'static str, &'static str> = TABLE_VIEWING_IDS;

    type Input = ViewingInput;

    fn create(id: String, input: Self::Input) -> Self {
        Self {
            id,
            residence_id: input.residence_id,
            request_id: input.request_id,
            fee: input.fee,
            date: input.date.unwrap_or_else(Utc::now),
        }
    }

    fn replace(&self, input: Self::Input) -> Self {
        Self::create(self.id.clone(), input)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> String {
        self.request_id.to_string()
    }
}

/// Read model for the viewing list: the stored accommodation reference is
/// replaced by the full document, or `null` when the reference dangles.
#[derive(Serialize, Debug)]
pub struct PopulatedViewing {
    pub id: String,
    pub residence_id: Option<Accommodation>,
    pub request_id: u64,
    pub fee: f64,
    pub date: DateTime<Utc>,
}

impl PopulatedViewing {
    pub fn new(viewing: Viewing, residence: Option<Accommodation>) -> Self {
        Self {
            id: viewing.id,
            residence_id: residence,
            request_id: viewing.request_id,
            fee: viewing.fee,
            date: viewing.date,
        }
    }
}
