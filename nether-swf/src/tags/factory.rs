//! Default handler registry

use hashbrown::HashMap;

use super::{
    Definition, DefineSprite, End, FrameLabelTag, JpegTables, PlaceObject, RawTag, RemoveObject,
    SceneAndFrameLabelData, SetBackgroundColor, ShowFrame, SoundStreamBlock, SoundStreamHead,
    TagFactory, TagHandler, types,
};

/// Builds a fresh handler for a type id
pub type TagConstructor = fn(u16) -> Box<dyn TagHandler>;

/// Factory covering every tag the timeline reconstruction understands.
/// Everything else becomes a [`RawTag`].
#[derive(Debug, Clone)]
pub struct DefaultTagFactory {
    constructors: HashMap<u16, TagConstructor>,
}

impl Default for DefaultTagFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultTagFactory {
    pub fn new() -> Self {
        let mut constructors: HashMap<u16, TagConstructor> = HashMap::new();
        constructors.insert(types::END, |_| Box::new(End));
        constructors.insert(types::SHOW_FRAME, |_| Box::new(ShowFrame));
        constructors.insert(types::SET_BACKGROUND_COLOR, |_| {
            Box::new(SetBackgroundColor::default())
        });
        constructors.insert(types::JPEG_TABLES, |_| Box::new(JpegTables::default()));
        constructors.insert(types::FRAME_LABEL, |_| Box::new(FrameLabelTag::default()));
        constructors.insert(types::DEFINE_SCENE_AND_FRAME_LABEL_DATA, |_| {
            Box::new(SceneAndFrameLabelData::default())
        });
        constructors.insert(types::SOUND_STREAM_BLOCK, |_| {
            Box::new(SoundStreamBlock::default())
        });
        constructors.insert(types::DEFINE_SPRITE, |_| Box::new(DefineSprite::default()));

        for id in [
            types::PLACE_OBJECT,
            types::PLACE_OBJECT2,
            types::PLACE_OBJECT3,
            types::PLACE_OBJECT4,
        ] {
            constructors.insert(id, |id| Box::new(PlaceObject::new(id)));
        }
        for id in [types::REMOVE_OBJECT, types::REMOVE_OBJECT2] {
            constructors.insert(id, |id| Box::new(RemoveObject::new(id)));
        }
        for id in [types::SOUND_STREAM_HEAD, types::SOUND_STREAM_HEAD2] {
            constructors.insert(id, |id| Box::new(SoundStreamHead::new(id)));
        }
        for &id in types::CHARACTER_DEFINITIONS {
            constructors.insert(id, |id| Box::new(Definition::new(id)));
        }

        Self { constructors }
    }

    /// Register or replace the constructor for a type id
    pub fn with(mut self, type_id: u16, constructor: TagConstructor) -> Self {
        self.constructors.insert(type_id, constructor);
        self
    }

    /// Whether a dedicated handler exists for this id
    pub fn handles(&self, type_id: u16) -> bool {
        self.constructors.contains_key(&type_id)
    }
}

impl TagFactory for DefaultTagFactory {
    fn create(&self, type_id: u16) -> Box<dyn TagHandler> {
        match self.constructors.get(&type_id) {
            Some(constructor) => constructor(type_id),
            None => Box::new(RawTag::new(type_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let factory = DefaultTagFactory::new();
        assert_eq!(factory.create(types::PLACE_OBJECT3).tag_type(), types::PLACE_OBJECT3);
        assert_eq!(factory.create(types::DEFINE_FONT3).name(), "DefineFont3");
        assert!(factory.create(types::DEFINE_SPRITE).as_container_mut().is_some());
        assert!(factory.create(types::SHOW_FRAME).as_container_mut().is_none());
    }

    #[test]
    fn test_unknown_ids_fall_back_to_raw() {
        let factory = DefaultTagFactory::new();
        let handler = factory.create(255);
        assert_eq!(handler.tag_type(), 255);
        assert_eq!(handler.name(), "Unknown");
        assert!(handler.as_any().downcast_ref::<RawTag>().is_some());

        // Known but uninterpreted ids are raw as well
        assert!(!factory.handles(types::DO_ACTION));
        assert_eq!(factory.create(types::DO_ACTION).name(), "DoAction");
    }

    #[test]
    fn test_override() {
        let factory = DefaultTagFactory::new().with(types::SHOW_FRAME, |id| Box::new(RawTag::new(id)));
        let handler = factory.create(types::SHOW_FRAME);
        assert!(handler.effect().is_none());
    }
}
