//! Tag type ids and display names

pub const END: u16 = 0;
pub const SHOW_FRAME: u16 = 1;
pub const DEFINE_SHAPE: u16 = 2;
pub const PLACE_OBJECT: u16 = 4;
pub const REMOVE_OBJECT: u16 = 5;
pub const DEFINE_BITS: u16 = 6;
pub const DEFINE_BUTTON: u16 = 7;
pub const JPEG_TABLES: u16 = 8;
pub const SET_BACKGROUND_COLOR: u16 = 9;
pub const DEFINE_FONT: u16 = 10;
pub const DEFINE_TEXT: u16 = 11;
pub const DO_ACTION: u16 = 12;
pub const DEFINE_FONT_INFO: u16 = 13;
pub const DEFINE_SOUND: u16 = 14;
pub const START_SOUND: u16 = 15;
pub const DEFINE_BUTTON_SOUND: u16 = 17;
pub const SOUND_STREAM_HEAD: u16 = 18;
pub const SOUND_STREAM_BLOCK: u16 = 19;
pub const DEFINE_BITS_LOSSLESS: u16 = 20;
pub const DEFINE_BITS_JPEG2: u16 = 21;
pub const DEFINE_SHAPE2: u16 = 22;
pub const DEFINE_BUTTON_CXFORM: u16 = 23;
pub const PROTECT: u16 = 24;
pub const PLACE_OBJECT2: u16 = 26;
pub const REMOVE_OBJECT2: u16 = 28;
pub const DEFINE_SHAPE3: u16 = 32;
pub const DEFINE_TEXT2: u16 = 33;
pub const DEFINE_BUTTON2: u16 = 34;
pub const DEFINE_BITS_JPEG3: u16 = 35;
pub const DEFINE_BITS_LOSSLESS2: u16 = 36;
pub const DEFINE_EDIT_TEXT: u16 = 37;
pub const DEFINE_SPRITE: u16 = 39;
pub const PRODUCT_INFO: u16 = 41;
pub const FRAME_LABEL: u16 = 43;
pub const SOUND_STREAM_HEAD2: u16 = 45;
pub const DEFINE_MORPH_SHAPE: u16 = 46;
pub const DEFINE_FONT2: u16 = 48;
pub const EXPORT_ASSETS: u16 = 56;
pub const IMPORT_ASSETS: u16 = 57;
pub const ENABLE_DEBUGGER: u16 = 58;
pub const DO_INIT_ACTION: u16 = 59;
pub const DEFINE_VIDEO_STREAM: u16 = 60;
pub const VIDEO_FRAME: u16 = 61;
pub const DEFINE_FONT_INFO2: u16 = 62;
pub const DEBUG_ID: u16 = 63;
pub const ENABLE_DEBUGGER2: u16 = 64;
pub const SCRIPT_LIMITS: u16 = 65;
pub const SET_TAB_INDEX: u16 = 66;
pub const FILE_ATTRIBUTES: u16 = 69;
pub const PLACE_OBJECT3: u16 = 70;
pub const IMPORT_ASSETS2: u16 = 71;
pub const DO_ABC_DEPRECATED: u16 = 72;
pub const DEFINE_FONT_ALIGN_ZONES: u16 = 73;
pub const CSM_TEXT_SETTINGS: u16 = 74;
pub const DEFINE_FONT3: u16 = 75;
pub const SYMBOL_CLASS: u16 = 76;
pub const METADATA: u16 = 77;
pub const DEFINE_SCALING_GRID: u16 = 78;
pub const DO_ABC: u16 = 82;
pub const DEFINE_SHAPE4: u16 = 83;
pub const DEFINE_MORPH_SHAPE2: u16 = 84;
pub const DEFINE_SCENE_AND_FRAME_LABEL_DATA: u16 = 86;
pub const DEFINE_BINARY_DATA: u16 = 87;
pub const DEFINE_FONT_NAME: u16 = 88;
pub const START_SOUND2: u16 = 89;
pub const DEFINE_BITS_JPEG4: u16 = 90;
pub const DEFINE_FONT4: u16 = 91;
pub const ENABLE_TELEMETRY: u16 = 93;
pub const PLACE_OBJECT4: u16 = 94;

/// Tags whose payload starts with the id of the character they define
pub const CHARACTER_DEFINITIONS: &[u16] = &[
    DEFINE_SHAPE,
    DEFINE_BITS,
    DEFINE_BUTTON,
    DEFINE_FONT,
    DEFINE_TEXT,
    DEFINE_SOUND,
    DEFINE_BITS_LOSSLESS,
    DEFINE_BITS_JPEG2,
    DEFINE_SHAPE2,
    DEFINE_SHAPE3,
    DEFINE_TEXT2,
    DEFINE_BUTTON2,
    DEFINE_BITS_JPEG3,
    DEFINE_BITS_LOSSLESS2,
    DEFINE_EDIT_TEXT,
    DEFINE_MORPH_SHAPE,
    DEFINE_FONT2,
    DEFINE_VIDEO_STREAM,
    DEFINE_FONT3,
    DEFINE_SHAPE4,
    DEFINE_MORPH_SHAPE2,
    DEFINE_BINARY_DATA,
    DEFINE_BITS_JPEG4,
    DEFINE_FONT4,
];

/// Display name for a known type id
pub fn tag_name(type_id: u16) -> Option<&'static str> {
    let name = match type_id {
        END => "End",
        SHOW_FRAME => "ShowFrame",
        DEFINE_SHAPE => "DefineShape",
        PLACE_OBJECT => "PlaceObject",
        REMOVE_OBJECT => "RemoveObject",
        DEFINE_BITS => "DefineBits",
        DEFINE_BUTTON => "DefineButton",
        JPEG_TABLES => "JPEGTables",
        SET_BACKGROUND_COLOR => "SetBackgroundColor",
        DEFINE_FONT => "DefineFont",
        DEFINE_TEXT => "DefineText",
        DO_ACTION => "DoAction",
        DEFINE_FONT_INFO => "DefineFontInfo",
        DEFINE_SOUND => "DefineSound",
        START_SOUND => "StartSound",
        DEFINE_BUTTON_SOUND => "DefineButtonSound",
        SOUND_STREAM_HEAD => "SoundStreamHead",
        SOUND_STREAM_BLOCK => "SoundStreamBlock",
        DEFINE_BITS_LOSSLESS => "DefineBitsLossless",
        DEFINE_BITS_JPEG2 => "DefineBitsJPEG2",
        DEFINE_SHAPE2 => "DefineShape2",
        DEFINE_BUTTON_CXFORM => "DefineButtonCxform",
        PROTECT => "Protect",
        PLACE_OBJECT2 => "PlaceObject2",
        REMOVE_OBJECT2 => "RemoveObject2",
        DEFINE_SHAPE3 => "DefineShape3",
        DEFINE_TEXT2 => "DefineText2",
        DEFINE_BUTTON2 => "DefineButton2",
        DEFINE_BITS_JPEG3 => "DefineBitsJPEG3",
        DEFINE_BITS_LOSSLESS2 => "DefineBitsLossless2",
        DEFINE_EDIT_TEXT => "DefineEditText",
        DEFINE_SPRITE => "DefineSprite",
        PRODUCT_INFO => "ProductInfo",
        FRAME_LABEL => "FrameLabel",
        SOUND_STREAM_HEAD2 => "SoundStreamHead2",
        DEFINE_MORPH_SHAPE => "DefineMorphShape",
        DEFINE_FONT2 => "DefineFont2",
        EXPORT_ASSETS => "ExportAssets",
        IMPORT_ASSETS => "ImportAssets",
        ENABLE_DEBUGGER => "EnableDebugger",
        DO_INIT_ACTION => "DoInitAction",
        DEFINE_VIDEO_STREAM => "DefineVideoStream",
        VIDEO_FRAME => "VideoFrame",
        DEFINE_FONT_INFO2 => "DefineFontInfo2",
        DEBUG_ID => "DebugID",
        ENABLE_DEBUGGER2 => "EnableDebugger2",
        SCRIPT_LIMITS => "ScriptLimits",
        SET_TAB_INDEX => "SetTabIndex",
        FILE_ATTRIBUTES => "FileAttributes",
        PLACE_OBJECT3 => "PlaceObject3",
        IMPORT_ASSETS2 => "ImportAssets2",
        DO_ABC_DEPRECATED => "DoABCDeprecated",
        DEFINE_FONT_ALIGN_ZONES => "DefineFontAlignZones",
        CSM_TEXT_SETTINGS => "CSMTextSettings",
        DEFINE_FONT3 => "DefineFont3",
        SYMBOL_CLASS => "SymbolClass",
        METADATA => "Metadata",
        DEFINE_SCALING_GRID => "DefineScalingGrid",
        DO_ABC => "DoABC",
        DEFINE_SHAPE4 => "DefineShape4",
        DEFINE_MORPH_SHAPE2 => "DefineMorphShape2",
        DEFINE_SCENE_AND_FRAME_LABEL_DATA => "DefineSceneAndFrameLabelData",
        DEFINE_BINARY_DATA => "DefineBinaryData",
        DEFINE_FONT_NAME => "DefineFontName",
        START_SOUND2 => "StartSound2",
        DEFINE_BITS_JPEG4 => "DefineBitsJPEG4",
        DEFINE_FONT4 => "DefineFont4",
        ENABLE_TELEMETRY => "EnableTelemetry",
        PLACE_OBJECT4 => "PlaceObject4",
        _ => return None,
    };
    Some(name)
}
