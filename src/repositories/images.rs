use diesel::prelude::*;

use crate::database::{DbPool, get_db_conn};
use crate::error::ApiError;
use crate::models::images::{Image, NewImage};
use crate::schema::images::dsl::*;

/// Inserts a new image record and returns the created record.
pub fn insert_image(pool: &DbPool, new: &NewImage) -> Result<Image, ApiError> {
    let mut conn = get_db_conn(pool)?;

    let record = diesel::insert_into(images)
        .values(new)
        .get_result(&mut conn)?;

    Ok(record)
}

/// Loads all image records, newest first.
pub fn load_all_images(pool: &DbPool) -> Result<Vec<Image>, ApiError> {
    let mut conn = get_db_conn(pool)?;

    let records = images.order(created_at.desc()).load::<Image>(&mut conn)?;

    Ok(records)
}
