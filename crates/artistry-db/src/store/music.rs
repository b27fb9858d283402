//! Music data-access. Records belong to an attributed artist and remember
//! which artist profile created them; the two may diverge.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::StoreError;
use crate::entities::music;

#[derive(Debug, Clone)]
pub struct NewMusic {
    pub title: String,
    pub album_name: Option<String>,
    pub release_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub genre: music::Genre,
}

pub async fn list_for_artist<C: ConnectionTrait>(
    db: &C,
    artist_id: Uuid,
) -> Result<Vec<music::Model>, StoreError> {
    let records = music::Entity::find()
        .filter(music::Column::ArtistId.eq(artist_id))
        .order_by_asc(music::Column::Title)
        .all(db)
        .await?;
    Ok(records)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    created_by: Option<Uuid>,
    artist_id: Option<Uuid>,
    new: NewMusic,
) -> Result<music::Model, StoreError> {
    let now = chrono::Utc::now().fixed_offset();
    let created = music::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(new.title),
        album_name: Set(new.album_name),
        release_date: Set(new.release_date),
        genre: Set(new.genre),
        created_by: Set(created_by),
        artist_id: Set(artist_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_list_filters_on_attributed_artist() {
        let artist_id = Uuid::new_v4();
        let sql = music::Entity::find()
            .filter(music::Column::ArtistId.eq(artist_id))
            .order_by_asc(music::Column::Title)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""artist_id""#), "{sql}");
        assert!(!sql.contains(r#""created_by" ="#), "{sql}");
    }
}
