use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::models::{
    Booking, BookingStatus, BookingUpdate, GalleryImage, GalleryImageUpdate, NewBooking, NewReview,
    Review, ServiceType, User, UserRole,
};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_dt(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

fn format_opt_dt(dt: &Option<NaiveDateTime>) -> Option<String> {
    dt.as_ref().map(format_dt)
}

fn parse_dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .unwrap_or_else(|_| chrono::Utc::now().naive_utc())
}

fn parse_opt_dt(s: Option<String>) -> Option<NaiveDateTime> {
    s.and_then(|v| NaiveDateTime::parse_from_str(&v, DATETIME_FORMAT).ok())
}

// ── Bookings ──

const BOOKING_COLUMNS: &str = "id, customer_name, phone_number, repair_type, address, \
     problem_description, status, created_at, confirmed_at, service_date, service_time, notes";

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let status_str: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    Ok(Booking {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        phone_number: row.get(2)?,
        repair_type: row.get(3)?,
        address: row.get(4)?,
        problem_description: row.get(5)?,
        status: BookingStatus::parse(&status_str),
        created_at: parse_dt(&created_at_str),
        confirmed_at: parse_opt_dt(row.get(8)?),
        service_date: parse_opt_dt(row.get(9)?),
        service_time: row.get(10)?,
        notes: row.get(11)?,
    })
}

/// Inserts a new booking in PENDING state. Missing required fields arrive
/// here as NULLs and are rejected by the schema's NOT NULL constraints.
pub fn insert_booking(
    conn: &Connection,
    new: &NewBooking,
    created_at: &NaiveDateTime,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (customer_name, phone_number, repair_type, address, problem_description, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.customer_name,
            new.phone_number,
            new.repair_type,
            new.address,
            new.problem_description,
            BookingStatus::Pending.as_str(),
            format_dt(created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOKING_COLUMNS} FROM bookings"))?;
    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn list_bookings_by_phone(conn: &Connection, phone: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE phone_number = ?1"
    ))?;
    let rows = stmt.query_map(params![phone], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Exact string match against the stored status column, so an unknown
/// status yields an empty list rather than an error.
pub fn list_bookings_by_status(conn: &Connection, status: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ?1"
    ))?;
    let rows = stmt.query_map(params![status], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Overwrites the admin-owned fields and stamps `confirmed_at`. A `None`
/// status is written as NULL and rejected by the schema.
pub fn update_booking(
    conn: &Connection,
    id: i64,
    update: &BookingUpdate,
    confirmed_at: &NaiveDateTime,
) -> anyhow::Result<usize> {
    let count = conn.execute(
        "UPDATE bookings
         SET status = ?1, service_date = ?2, service_time = ?3, notes = ?4, confirmed_at = ?5
         WHERE id = ?6",
        params![
            update.status.map(|s| s.as_str()),
            format_opt_dt(&update.service_date),
            update.service_time,
            update.notes,
            format_dt(confirmed_at),
            id,
        ],
    )?;
    Ok(count)
}

pub fn delete_booking(conn: &Connection, id: i64) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count)
}

pub fn count_bookings(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_bookings_by_status(conn: &Connection, status: &str) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE status = ?1",
        params![status],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ── Reviews ──

const REVIEW_COLUMNS: &str = "id, customer_name, customer_email, customer_phone, review_text, \
     rating, service_type, is_approved, created_at, approved_at";

fn parse_review_row(row: &rusqlite::Row) -> anyhow::Result<Review> {
    let created_at_str: String = row.get(8)?;

    Ok(Review {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        customer_email: row.get(2)?,
        customer_phone: row.get(3)?,
        review_text: row.get(4)?,
        rating: row.get(5)?,
        service_type: row.get(6)?,
        is_approved: row.get::<_, i32>(7)? != 0,
        created_at: parse_dt(&created_at_str),
        approved_at: parse_opt_dt(row.get(9)?),
    })
}

pub fn insert_review(
    conn: &Connection,
    new: &NewReview,
    created_at: &NaiveDateTime,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO reviews (customer_name, customer_email, customer_phone, review_text, rating, service_type, is_approved, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
        params![
            new.customer_name,
            new.customer_email,
            new.customer_phone,
            new.review_text,
            new.rating,
            new.service_type,
            format_dt(created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_review_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Review>> {
    let result = conn.query_row(
        &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
        params![id],
        |row| Ok(parse_review_row(row)),
    );

    match result {
        Ok(review) => Ok(Some(review?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_reviews_by_approval(conn: &Connection, approved: bool) -> anyhow::Result<Vec<Review>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE is_approved = ?1"
    ))?;
    let rows = stmt.query_map(params![approved as i32], |row| Ok(parse_review_row(row)))?;

    let mut reviews = vec![];
    for row in rows {
        reviews.push(row??);
    }
    Ok(reviews)
}

pub fn approve_review(
    conn: &Connection,
    id: i64,
    approved_at: &NaiveDateTime,
) -> anyhow::Result<usize> {
    let count = conn.execute(
        "UPDATE reviews SET is_approved = 1, approved_at = ?1 WHERE id = ?2",
        params![format_dt(approved_at), id],
    )?;
    Ok(count)
}

/// Clears approval; the earlier `approved_at` stamp is left in place.
pub fn reject_review(conn: &Connection, id: i64) -> anyhow::Result<usize> {
    let count = conn.execute(
        "UPDATE reviews SET is_approved = 0 WHERE id = ?1",
        params![id],
    )?;
    Ok(count)
}

pub fn delete_review(conn: &Connection, id: i64) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM reviews WHERE id = ?1", params![id])?;
    Ok(count)
}

pub fn count_pending_reviews(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM reviews WHERE is_approved = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Average rating over approved reviews only; 0.0 when none are approved.
pub fn average_approved_rating(conn: &Connection) -> anyhow::Result<f64> {
    let avg: Option<f64> = conn.query_row(
        "SELECT AVG(rating) FROM reviews WHERE is_approved = 1",
        [],
        |row| row.get(0),
    )?;
    Ok(avg.unwrap_or(0.0))
}

// ── Gallery ──

const GALLERY_COLUMNS: &str =
    "id, image_url, service_type, image_type, image_description, is_active, uploaded_at";

fn parse_gallery_row(row: &rusqlite::Row) -> anyhow::Result<GalleryImage> {
    let uploaded_at_str: String = row.get(6)?;

    Ok(GalleryImage {
        id: row.get(0)?,
        image_url: row.get(1)?,
        service_type: row.get(2)?,
        image_type: row.get(3)?,
        image_description: row.get(4)?,
        is_active: row.get::<_, i32>(5)? != 0,
        uploaded_at: parse_dt(&uploaded_at_str),
    })
}

pub fn insert_gallery_image(
    conn: &Connection,
    image_url: &str,
    service_type: &str,
    image_type: Option<&str>,
    image_description: Option<&str>,
    uploaded_at: &NaiveDateTime,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO gallery (image_url, service_type, image_type, image_description, is_active, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, 1, ?5)",
        params![
            image_url,
            service_type,
            image_type,
            image_description,
            format_dt(uploaded_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_gallery_image_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<GalleryImage>> {
    let result = conn.query_row(
        &format!("SELECT {GALLERY_COLUMNS} FROM gallery WHERE id = ?1"),
        params![id],
        |row| Ok(parse_gallery_row(row)),
    );

    match result {
        Ok(image) => Ok(Some(image?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_active_gallery_images(conn: &Connection) -> anyhow::Result<Vec<GalleryImage>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GALLERY_COLUMNS} FROM gallery WHERE is_active = 1"
    ))?;
    let rows = stmt.query_map([], |row| Ok(parse_gallery_row(row)))?;

    let mut images = vec![];
    for row in rows {
        images.push(row??);
    }
    Ok(images)
}

pub fn list_active_gallery_images_by_service(
    conn: &Connection,
    service_type: &str,
) -> anyhow::Result<Vec<GalleryImage>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GALLERY_COLUMNS} FROM gallery WHERE service_type = ?1 AND is_active = 1"
    ))?;
    let rows = stmt.query_map(params![service_type], |row| Ok(parse_gallery_row(row)))?;

    let mut images = vec![];
    for row in rows {
        images.push(row??);
    }
    Ok(images)
}

pub fn list_all_gallery_images(conn: &Connection) -> anyhow::Result<Vec<GalleryImage>> {
    let mut stmt = conn.prepare(&format!("SELECT {GALLERY_COLUMNS} FROM gallery"))?;
    let rows = stmt.query_map([], |row| Ok(parse_gallery_row(row)))?;

    let mut images = vec![];
    for row in rows {
        images.push(row??);
    }
    Ok(images)
}

pub fn update_gallery_image(
    conn: &Connection,
    id: i64,
    update: &GalleryImageUpdate,
) -> anyhow::Result<usize> {
    let count = conn.execute(
        "UPDATE gallery SET image_type = ?1, image_description = ?2, is_active = ?3 WHERE id = ?4",
        params![
            update.image_type,
            update.image_description,
            update.is_active.unwrap_or(true) as i32,
            id,
        ],
    )?;
    Ok(count)
}

pub fn delete_gallery_image(conn: &Connection, id: i64) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM gallery WHERE id = ?1", params![id])?;
    Ok(count)
}

// ── Service Types ──

fn parse_service_type_row(row: &rusqlite::Row) -> anyhow::Result<ServiceType> {
    Ok(ServiceType {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        image_url: row.get(3)?,
        display_order: row.get(4)?,
        is_active: row.get::<_, i32>(5)? != 0,
    })
}

pub fn insert_service_type(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
    image_url: Option<&str>,
    display_order: i32,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO service_types (name, description, image_url, display_order, is_active)
         VALUES (?1, ?2, ?3, ?4, 1)",
        params![name, description, image_url, display_order],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_active_service_types(conn: &Connection) -> anyhow::Result<Vec<ServiceType>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, image_url, display_order, is_active
         FROM service_types WHERE is_active = 1 ORDER BY display_order ASC",
    )?;
    let rows = stmt.query_map([], |row| Ok(parse_service_type_row(row)))?;

    let mut types = vec![];
    for row in rows {
        types.push(row??);
    }
    Ok(types)
}

// ── Users ──

const USER_COLUMNS: &str =
    "id, email, password_hash, role, full_name, phone_number, is_active, created_at, last_login";

fn parse_user_row(row: &rusqlite::Row) -> anyhow::Result<User> {
    let role_str: String = row.get(3)?;
    let created_at_str: String = row.get(7)?;

    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: UserRole::parse(&role_str),
        full_name: row.get(4)?,
        phone_number: row.get(5)?,
        is_active: row.get::<_, i32>(6)? != 0,
        created_at: parse_dt(&created_at_str),
        last_login: parse_opt_dt(row.get(8)?),
    })
}

pub fn insert_user(
    conn: &Connection,
    email: Option<&str>,
    password_hash: Option<&str>,
    role: Option<UserRole>,
    full_name: Option<&str>,
    phone_number: Option<&str>,
    created_at: &NaiveDateTime,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO users (email, password_hash, role, full_name, phone_number, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        params![
            email,
            password_hash,
            role.map(|r| r.as_str()),
            full_name,
            phone_number,
            format_dt(created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        |row| Ok(parse_user_row(row)),
    );

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_user_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        |row| Ok(parse_user_row(row)),
    );

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn touch_last_login(
    conn: &Connection,
    id: i64,
    when: &NaiveDateTime,
) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE users SET last_login = ?1 WHERE id = ?2",
        params![format_dt(when), id],
    )?;
    Ok(())
}
