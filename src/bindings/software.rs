/*! CPU-side resources, before anything touches a GPU. */

pub mod image;
