//! Attribute definitions for the parts catalog.
//!
//! Patterns are written against listing text as it actually appears:
//! Swedish and English vocabulary mixed, decimal commas, units glued to
//! numbers ("70cc", "47mm").

use partlex_domain::{
    AttributeDefinition, DataType, EnumValueDefinition, Importance, Normalise, NumericValidation,
    RegexRule, Scope, SourceField,
};

/// All shipped attribute definitions, in catalog order
pub fn definitions() -> Vec<AttributeDefinition> {
    vec![
        cylinder_diameter(),
        cylinder_displacement(),
        piston_pin_diameter(),
        brand_oem(),
        brand_manufacturer(),
        compatibility_model(),
        electrical_voltage(),
        electrical_bulb_socket(),
        material_primary(),
        kit_complete(),
        thread_size(),
    ]
}

fn cylinder_diameter() -> AttributeDefinition {
    AttributeDefinition {
        slug: "cylinder.diameter".to_string(),
        label: "Cylinder bore".to_string(),
        description: "Bore diameter of the cylinder, canonical in millimeters".to_string(),
        scope: Scope::Category,
        data_type: DataType::Number,
        importance: Importance::Critical,
        unit: Some("mm".to_string()),
        category_applicability: vec!["Cylinder".to_string()],
        source_fields: vec![
            SourceField::Name,
            SourceField::Description,
            SourceField::SpecSheet,
        ],
        regex: vec![
            RegexRule::new(
                "bore-with-unit",
                r#"(?P<value>\d+(?:[.,]\d+)?)\s*(?P<unit>mm|cm|tum|")"#,
            )
            .with_flags("i")
            .with_normalise(Normalise::Numeric),
            RegexRule::new(
                "bore-labelled",
                r"borr(?:ning)?(?:sdiameter)?\D{0,4}(?P<value>\d+(?:[.,]\d+)?)\s*(?P<unit>mm|cm)?",
            )
            .with_flags("i")
            .with_normalise(Normalise::Numeric),
        ],
        enum_values: Vec::new(),
        default_confidence: 0.9,
        validations: Some(NumericValidation {
            min: Some(30.0),
            max: Some(110.0),
            step: None,
            integer: false,
        }),
    }
}

fn cylinder_displacement() -> AttributeDefinition {
    AttributeDefinition {
        slug: "cylinder.displacement".to_string(),
        label: "Displacement".to_string(),
        description: "Swept volume in cubic centimeters".to_string(),
        scope: Scope::Category,
        data_type: DataType::Number,
        importance: Importance::Critical,
        unit: Some("cc".to_string()),
        category_applicability: vec!["Cylinder".to_string(), "Motor".to_string()],
        source_fields: vec![
            SourceField::Name,
            SourceField::Description,
            SourceField::SpecSheet,
        ],
        regex: vec![RegexRule::new(
            "displacement-with-unit",
            r"(?P<value>\d+(?:[.,]\d+)?)\s*(?P<unit>cc|cm3|cm³)",
        )
        .with_flags("i")
        .with_normalise(Normalise::Numeric)],
        enum_values: Vec::new(),
        default_confidence: 0.9,
        validations: Some(NumericValidation {
            min: Some(45.0),
            max: Some(310.0),
            step: None,
            integer: false,
        }),
    }
}

fn piston_pin_diameter() -> AttributeDefinition {
    AttributeDefinition {
        slug: "piston.pin_diameter".to_string(),
        label: "Piston pin diameter".to_string(),
        description: "Gudgeon pin diameter, canonical in millimeters".to_string(),
        scope: Scope::Category,
        data_type: DataType::Number,
        importance: Importance::Medium,
        unit: Some("mm".to_string()),
        category_applicability: vec!["Cylinder".to_string(), "Kolv".to_string()],
        source_fields: vec![SourceField::Description, SourceField::SpecSheet],
        regex: vec![RegexRule::new(
            "pin-labelled",
            r"kolvbult(?:sdiameter)?\D{0,6}(?P<value>\d+(?:[.,]\d+)?)\s*(?P<unit>mm)?",
        )
        .with_flags("i")
        .with_normalise(Normalise::Numeric)],
        enum_values: Vec::new(),
        default_confidence: 0.85,
        validations: Some(NumericValidation {
            min: Some(8.0),
            max: Some(18.0),
            step: None,
            integer: false,
        }),
    }
}

fn brand_oem() -> AttributeDefinition {
    AttributeDefinition {
        slug: "brand.oem".to_string(),
        label: "OEM brand".to_string(),
        description: "Vehicle or engine brand the part was made for".to_string(),
        scope: Scope::Universal,
        data_type: DataType::String,
        importance: Importance::High,
        unit: None,
        category_applicability: Vec::new(),
        source_fields: vec![
            SourceField::Name,
            SourceField::Description,
            SourceField::SpecSheet,
        ],
        regex: vec![RegexRule::new(
            "oem-token",
            r"\b(?P<value>sachs|mcb|baotian|kymco|honda|yamaha|suzuki|puch|zündapp|zundapp|kreidler|tomos|peugeot|piaggio|minarelli|morini|gy6)\b",
        )
        .with_flags("i")],
        enum_values: Vec::new(),
        default_confidence: 0.8,
        validations: None,
    }
}

fn brand_manufacturer() -> AttributeDefinition {
    AttributeDefinition {
        slug: "brand.manufacturer".to_string(),
        label: "Manufacturer".to_string(),
        description: "Aftermarket manufacturer of the part itself".to_string(),
        scope: Scope::Universal,
        data_type: DataType::String,
        importance: Importance::Medium,
        unit: None,
        category_applicability: Vec::new(),
        source_fields: vec![
            SourceField::Name,
            SourceField::Description,
            SourceField::SpecSheet,
        ],
        regex: vec![RegexRule::new(
            "manufacturer-token",
            r"\b(?P<value>naraku|airsal|polini|malossi|dellorto|dell'orto|ngk|bosch|athena|doppler)\b",
        )
        .with_flags("i")],
        enum_values: Vec::new(),
        default_confidence: 0.75,
        validations: None,
    }
}

fn compatibility_model() -> AttributeDefinition {
    AttributeDefinition {
        slug: "compatibility.model".to_string(),
        label: "Compatible models".to_string(),
        description: "Vehicle models the part fits".to_string(),
        scope: Scope::Category,
        data_type: DataType::MultiEnum,
        importance: Importance::High,
        unit: None,
        category_applicability: vec![
            "Moped - MC".to_string(),
            "Moped".to_string(),
            "Cylinder".to_string(),
            "Belysning / Blinkers".to_string(),
            "Avgassystem".to_string(),
        ],
        source_fields: vec![SourceField::Name, SourceField::Description],
        regex: vec![RegexRule::new(
            "model-token",
            r"\b(?P<value>transport|compact|florett|maxi|dakota|fs1|ciao)\b",
        )
        .with_flags("i")],
        enum_values: Vec::new(),
        default_confidence: 0.75,
        validations: None,
    }
}

fn electrical_voltage() -> AttributeDefinition {
    AttributeDefinition {
        slug: "electrical.voltage".to_string(),
        label: "Voltage".to_string(),
        description: "Nominal system voltage".to_string(),
        scope: Scope::Category,
        data_type: DataType::Number,
        importance: Importance::Medium,
        unit: Some("V".to_string()),
        category_applicability: vec![
            "Belysning / Blinkers".to_string(),
            "Tändning".to_string(),
            "Elektriskt".to_string(),
        ],
        source_fields: vec![
            SourceField::Name,
            SourceField::Description,
            SourceField::SpecSheet,
        ],
        regex: vec![RegexRule::new(
            "voltage",
            r"(?P<value>\d+(?:[.,]\d+)?)\s*(?P<unit>v|volt)\b",
        )
        .with_flags("i")
        .with_normalise(Normalise::Numeric)],
        enum_values: Vec::new(),
        default_confidence: 0.85,
        validations: Some(NumericValidation {
            min: Some(6.0),
            max: Some(12.0),
            step: Some(6.0),
            integer: true,
        }),
    }
}

fn electrical_bulb_socket() -> AttributeDefinition {
    AttributeDefinition {
        slug: "electrical.bulb_socket".to_string(),
        label: "Bulb socket".to_string(),
        description: "Bulb base designation".to_string(),
        scope: Scope::Category,
        data_type: DataType::Enum,
        importance: Importance::Medium,
        unit: None,
        category_applicability: vec!["Belysning / Blinkers".to_string()],
        source_fields: vec![SourceField::Description, SourceField::SpecSheet],
        regex: vec![RegexRule::new(
            "socket-token",
            r"\b(?P<value>ba15s|bay15d|ba20d|p26s|1156|1157)\b",
        )
        .with_flags("i")],
        enum_values: vec![
            EnumValueDefinition::new("BA15s", ["1156"]),
            EnumValueDefinition::new("BAY15d", ["1157"]),
            EnumValueDefinition::new("BA20d", std::iter::empty::<&str>()),
            EnumValueDefinition::new("P26s", std::iter::empty::<&str>()),
        ],
        default_confidence: 0.85,
        validations: None,
    }
}

fn material_primary() -> AttributeDefinition {
    AttributeDefinition {
        slug: "material.primary".to_string(),
        label: "Material".to_string(),
        description: "Primary material of the part".to_string(),
        scope: Scope::Universal,
        data_type: DataType::Enum,
        importance: Importance::Low,
        unit: None,
        category_applicability: Vec::new(),
        source_fields: vec![
            SourceField::Description,
            SourceField::Bullet,
            SourceField::SpecSheet,
        ],
        regex: vec![RegexRule::new(
            "material-token",
            r"\b(?P<value>aluminium|aluminum|alu|gjutjärn|gjutjarn|cast iron|stål|stal|steel|plast|plastic|abs|krom|chrome|chromed|förkromad)\b",
        )
        .with_flags("i")],
        enum_values: vec![
            EnumValueDefinition::new("Aluminium", ["aluminum", "alu"]),
            EnumValueDefinition::new("Gjutjärn", ["gjutjarn", "cast iron"]),
            EnumValueDefinition::new("Stål", ["stal", "steel"]),
            EnumValueDefinition::new("Plast", ["plastic", "abs"]),
            EnumValueDefinition::new("Krom", ["chrome", "chromed", "förkromad"]),
        ],
        default_confidence: 0.7,
        validations: None,
    }
}

fn kit_complete() -> AttributeDefinition {
    AttributeDefinition {
        slug: "kit.complete".to_string(),
        label: "Complete kit".to_string(),
        description: "Whether the listing is a complete kit rather than a bare part".to_string(),
        scope: Scope::Category,
        data_type: DataType::Boolean,
        importance: Importance::Low,
        unit: None,
        category_applicability: vec!["Cylinder".to_string(), "Avgassystem".to_string()],
        source_fields: vec![SourceField::Name, SourceField::Description],
        regex: vec![RegexRule::new("complete-token", r"\b(?P<value>komplett|complete)\b")
            .with_flags("i")
            .with_normalise(Normalise::Lowercase)],
        enum_values: Vec::new(),
        default_confidence: 0.6,
        validations: None,
    }
}

fn thread_size() -> AttributeDefinition {
    AttributeDefinition {
        slug: "thread.size".to_string(),
        label: "Thread size".to_string(),
        description: "Metric thread designation, e.g. M10x1.25".to_string(),
        scope: Scope::Universal,
        data_type: DataType::String,
        importance: Importance::Low,
        unit: None,
        category_applicability: Vec::new(),
        source_fields: vec![SourceField::Description, SourceField::SpecSheet],
        regex: vec![RegexRule::new(
            "metric-thread",
            r"\b(?P<value>m\d{1,2}(?:x\d+(?:[.,]\d+)?)?)\b",
        )
        .with_flags("i")
        .with_normalise(Normalise::Uppercase)],
        enum_values: Vec::new(),
        default_confidence: 0.8,
        validations: None,
    }
}
