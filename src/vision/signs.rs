// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Traffic sign classes known to the classifier (GTSRB, 43 classes)

/// Number of classes the classifier scores
pub const NUM_SIGN_CLASSES: usize = 43;

/// Label used for ids with no table entry
pub const UNKNOWN_SIGN_LABEL: &str = "Unknown";

/// Recognizable sign types, discriminant = classifier output index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignClass {
    SpeedLimit20 = 0,
    SpeedLimit30 = 1,
    SpeedLimit50 = 2,
    SpeedLimit60 = 3,
    SpeedLimit70 = 4,
    SpeedLimit80 = 5,
    EndSpeedLimit80 = 6,
    SpeedLimit100 = 7,
    SpeedLimit120 = 8,
    NoPassing = 9,
    NoPassingVehOver3_5Tons = 10,
    RightOfWayAtIntersection = 11,
    PriorityRoad = 12,
    Yield = 13,
    Stop = 14,
    NoVehicles = 15,
    VehOver3_5TonsProhibited = 16,
    NoEntry = 17,
    GeneralCaution = 18,
    DangerousCurveLeft = 19,
    DangerousCurveRight = 20,
    DoubleCurve = 21,
    BumpyRoad = 22,
    SlipperyRoad = 23,
    RoadNarrowsOnTheRight = 24,
    RoadWork = 25,
    TrafficSignals = 26,
    Pedestrians = 27,
    ChildrenCrossing = 28,
    BicyclesCrossing = 29,
    BewareOfIceSnow = 30,
    WildAnimalsCrossing = 31,
    EndSpeedAndPassingLimits = 32,
    TurnRightAhead = 33,
    TurnLeftAhead = 34,
    AheadOnly = 35,
    GoStraightOrRight = 36,
    GoStraightOrLeft = 37,
    KeepRight = 38,
    KeepLeft = 39,
    RoundaboutMandatory = 40,
    EndOfNoPassing = 41,
    EndNoPassingVehOver3_5Tons = 42,
}

impl SignClass {
    /// All classes in id order
    pub const ALL: [SignClass; NUM_SIGN_CLASSES] = [
        SignClass::SpeedLimit20,
        SignClass::SpeedLimit30,
        SignClass::SpeedLimit50,
        SignClass::SpeedLimit60,
        SignClass::SpeedLimit70,
        SignClass::SpeedLimit80,
        SignClass::EndSpeedLimit80,
        SignClass::SpeedLimit100,
        SignClass::SpeedLimit120,
        SignClass::NoPassing,
        SignClass::NoPassingVehOver3_5Tons,
        SignClass::RightOfWayAtIntersection,
        SignClass::PriorityRoad,
        SignClass::Yield,
        SignClass::Stop,
        SignClass::NoVehicles,
        SignClass::VehOver3_5TonsProhibited,
        SignClass::NoEntry,
        SignClass::GeneralCaution,
        SignClass::DangerousCurveLeft,
        SignClass::DangerousCurveRight,
        SignClass::DoubleCurve,
        SignClass::BumpyRoad,
        SignClass::SlipperyRoad,
        SignClass::RoadNarrowsOnTheRight,
        SignClass::RoadWork,
        SignClass::TrafficSignals,
        SignClass::Pedestrians,
        SignClass::ChildrenCrossing,
        SignClass::BicyclesCrossing,
        SignClass::BewareOfIceSnow,
        SignClass::WildAnimalsCrossing,
        SignClass::EndSpeedAndPassingLimits,
        SignClass::TurnRightAhead,
        SignClass::TurnLeftAhead,
        SignClass::AheadOnly,
        SignClass::GoStraightOrRight,
        SignClass::GoStraightOrLeft,
        SignClass::KeepRight,
        SignClass::KeepLeft,
        SignClass::RoundaboutMandatory,
        SignClass::EndOfNoPassing,
        SignClass::EndNoPassingVehOver3_5Tons,
    ];

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<SignClass> {
        Self::ALL.get(id).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            SignClass::SpeedLimit20 => "Speed limit (20km/h)",
            SignClass::SpeedLimit30 => "Speed limit (30km/h)",
            SignClass::SpeedLimit50 => "Speed limit (50km/h)",
            SignClass::SpeedLimit60 => "Speed limit (60km/h)",
            SignClass::SpeedLimit70 => "Speed limit (70km/h)",
            SignClass::SpeedLimit80 => "Speed limit (80km/h)",
            SignClass::EndSpeedLimit80 => "End of speed limit (80km/h)",
            SignClass::SpeedLimit100 => "Speed limit (100km/h)",
            SignClass::SpeedLimit120 => "Speed limit (120km/h)",
            SignClass::NoPassing => "No passing",
            SignClass::NoPassingVehOver3_5Tons => "No passing for vehicles over 3.5 tons",
            SignClass::RightOfWayAtIntersection => "Right-of-way at the next intersection",
            SignClass::PriorityRoad => "Priority road",
            SignClass::Yield => "Yield",
            SignClass::Stop => "Stop",
            SignClass::NoVehicles => "No vehicles",
            SignClass::VehOver3_5TonsProhibited => "Vehicles over 3.5 tons prohibited",
            SignClass::NoEntry => "No entry",
            SignClass::GeneralCaution => "General caution",
            SignClass::DangerousCurveLeft => "Dangerous curve to the left",
            SignClass::DangerousCurveRight => "Dangerous curve to the right",
            SignClass::DoubleCurve => "Double curve",
            SignClass::BumpyRoad => "Bumpy road",
            SignClass::SlipperyRoad => "Slippery road",
            SignClass::RoadNarrowsOnTheRight => "Road narrows on the right",
            SignClass::RoadWork => "Road work",
            SignClass::TrafficSignals => "Traffic signals",
            SignClass::Pedestrians => "Pedestrians",
            SignClass::ChildrenCrossing => "Children crossing",
            SignClass::BicyclesCrossing => "Bicycles crossing",
            SignClass::BewareOfIceSnow => "Beware of ice/snow",
            SignClass::WildAnimalsCrossing => "Wild animals crossing",
            SignClass::EndSpeedAndPassingLimits => "End of all speed and passing limits",
            SignClass::TurnRightAhead => "Turn right ahead",
            SignClass::TurnLeftAhead => "Turn left ahead",
            SignClass::AheadOnly => "Ahead only",
            SignClass::GoStraightOrRight => "Go straight or right",
            SignClass::GoStraightOrLeft => "Go straight or left",
            SignClass::KeepRight => "Keep right",
            SignClass::KeepLeft => "Keep left",
            SignClass::RoundaboutMandatory => "Roundabout mandatory",
            SignClass::EndOfNoPassing => "End of no passing",
            SignClass::EndNoPassingVehOver3_5Tons => {
                "End of no passing by vehicles over 3.5 tons"
            }
        }
    }
}

/// Display label for a classifier output index
pub fn label_for_id(id: usize) -> &'static str {
    SignClass::from_id(id)
        .map(SignClass::label)
        .unwrap_or(UNKNOWN_SIGN_LABEL)
}
