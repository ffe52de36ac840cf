#![allow(dead_code)]

use rose_model::{EntityDescriptor, EntityType, TypeRegistry};

pub fn book_type() -> EntityType {
    EntityDescriptor::new("Book")
        .text("title")
        .integer("pages")
        .decimal("price")
        .boolean("available")
        .date("published")
        .to_one("author", "Author")
        .to_many("tags", "Tag")
        .timestamped()
        .build()
}

pub fn author_type() -> EntityType {
    EntityDescriptor::new("Author").text("name").build()
}

pub fn tag_type() -> EntityType {
    EntityDescriptor::new("Tag").text("label").build()
}

pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with(book_type())
        .with(author_type())
        .with(tag_type())
}
