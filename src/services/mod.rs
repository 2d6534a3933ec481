pub mod auth;
pub mod booking;
pub mod gallery;
pub mod messaging;
pub mod notification;
pub mod review;
pub mod whatsapp;
