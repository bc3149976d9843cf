//! Fixed demo datasets served by the `/api` routes.
//!
//! Both tables are compiled into the binary and never change at runtime.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Item {
    pub id: u32,
    pub name: &'static str,
    pub price: f64,
}

pub static USERS: &[User] = &[
    User {
        id: 1,
        name: "Alice",
        email: "alice@example.com",
    },
    User {
        id: 2,
        name: "Bob",
        email: "bob@example.com",
    },
    User {
        id: 3,
        name: "Charlie",
        email: "charlie@example.com",
    },
];

pub static ITEMS: &[Item] = &[
    Item {
        id: 1,
        name: "Item 1",
        price: 10.99,
    },
    Item {
        id: 2,
        name: "Item 2",
        price: 20.49,
    },
    Item {
        id: 3,
        name: "Item 3",
        price: 5.99,
    },
];
