//! Element constructors — one per [`vapor_core::ElementKind`]. Each opens
//! its node immediately via [`crate::element::open_builder`] so a child
//! block evaluated afterward (while this node is the lifecycle stack's
//! top) attaches as this node's child.

use std::rc::Rc;

use crate::element::{
    open_builder, ContainerAttrs, ElementBuilder, ImageAttrs, InputAttrs, InteractiveAttrs,
    TextAttrs,
};

#[track_caller]
pub fn container() -> ElementBuilder<ContainerAttrs> {
    open_builder(None, ContainerAttrs)
}

#[track_caller]
pub fn container_keyed(key: impl Into<Rc<str>>) -> ElementBuilder<ContainerAttrs> {
    open_builder(Some(key.into()), ContainerAttrs)
}

#[track_caller]
pub fn text(content: impl Into<Rc<str>>) -> ElementBuilder<TextAttrs> {
    open_builder(None, TextAttrs { content: content.into() })
}

#[track_caller]
pub fn text_keyed(key: impl Into<Rc<str>>, content: impl Into<Rc<str>>) -> ElementBuilder<TextAttrs> {
    open_builder(Some(key.into()), TextAttrs { content: content.into() })
}

#[track_caller]
pub fn image(src: impl Into<Rc<str>>) -> ElementBuilder<ImageAttrs> {
    open_builder(None, ImageAttrs { src: src.into(), alt: None })
}

#[track_caller]
pub fn image_keyed(key: impl Into<Rc<str>>, src: impl Into<Rc<str>>) -> ElementBuilder<ImageAttrs> {
    open_builder(Some(key.into()), ImageAttrs { src: src.into(), alt: None })
}

#[track_caller]
pub fn interactive() -> ElementBuilder<InteractiveAttrs> {
    open_builder(None, InteractiveAttrs::default())
}

#[track_caller]
pub fn interactive_keyed(key: impl Into<Rc<str>>) -> ElementBuilder<InteractiveAttrs> {
    open_builder(Some(key.into()), InteractiveAttrs::default())
}

#[track_caller]
pub fn input() -> ElementBuilder<InputAttrs> {
    open_builder(None, InputAttrs::default())
}

#[track_caller]
pub fn input_keyed(key: impl Into<Rc<str>>) -> ElementBuilder<InputAttrs> {
    open_builder(Some(key.into()), InputAttrs::default())
}
