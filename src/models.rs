use serde::Deserialize;

/// A post from the `/posts` collection
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Postal address nested inside an [`Account`]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    #[serde(rename = "zipcode")]
    pub postal_code: String,
}

impl Address {
    /// "street, suite" line
    pub fn street_line(&self) -> String {
        format!("{}, {}", self.street, self.suite)
    }

    /// "city postal-code" line
    pub fn city_line(&self) -> String {
        format!("{} {}", self.city, self.postal_code)
    }
}

/// Employer nested inside an [`Account`] (the API calls it `company`)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub slogan: String,
    #[serde(rename = "bs")]
    pub tagline: String,
}

/// A user from the `/users` collection
///
/// Every field is required. Unknown fields such as `address.geo` are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    #[serde(rename = "company")]
    pub organization: Organization,
}

impl Account {
    /// First character of the display name, used as an avatar
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }

    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}

/// A photo from the `/photos` collection
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
///
/// `albumId` may be absent; the other fields are required.
pub struct Photo {
    pub id: u64,
    #[serde(default)]
    pub album_id: Option<u64>,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl Photo {
    pub fn album_label(&self) -> String {
        match self.album_id {
            Some(album) => format!("album {}", album),
            None => String::from("no album"),
        }
    }
}

/// Remote collections the browser knows how to load
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Resource {
    #[default]
    Posts,
    Users,
    Photos,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Posts, Resource::Users, Resource::Photos];

    /// Path segment appended to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Users => "users",
            Resource::Photos => "photos",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Posts => "Posts",
            Resource::Users => "Users",
            Resource::Photos => "Photos",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Resource::Posts => 0,
            Resource::Users => 1,
            Resource::Photos => 2,
        }
    }

    /// Build the full endpoint URL for this resource under `base`
    pub fn endpoint(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path())
    }
}
