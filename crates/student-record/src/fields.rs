//! Field names collected by the student form

pub const SCHOOL: &str = "school";
pub const SEX: &str = "sex";
pub const AGE: &str = "age";
pub const ADDRESS: &str = "address";
pub const FAMSIZE: &str = "famsize";
pub const PSTATUS: &str = "Pstatus";
pub const MEDU: &str = "Medu";
pub const FEDU: &str = "Fedu";
pub const MJOB: &str = "Mjob";
pub const FJOB: &str = "Fjob";
pub const REASON: &str = "reason";
pub const GUARDIAN: &str = "guardian";
pub const TRAVELTIME: &str = "traveltime";
pub const STUDYTIME: &str = "studytime";
pub const FAILURES: &str = "failures";
pub const SCHOOLSUP: &str = "schoolsup";
pub const FAMSUP: &str = "famsup";
pub const PAID: &str = "paid";
pub const ACTIVITIES: &str = "activities";
pub const NURSERY: &str = "nursery";
pub const HIGHER: &str = "higher";
pub const INTERNET: &str = "internet";
pub const ROMANTIC: &str = "romantic";
pub const FAMREL: &str = "famrel";
pub const FREETIME: &str = "freetime";
pub const GOOUT: &str = "goout";
pub const DALC: &str = "Dalc";
pub const WALC: &str = "Walc";
pub const HEALTH: &str = "health";
pub const ABSENCES: &str = "absences";
pub const G1: &str = "G1";
pub const G2: &str = "G2";
pub const SUBJECT: &str = "subject";

/// Grade trend between the two periods (`G2 - G1`)
pub const CHANGE: &str = "change";
/// Mean of the two period grades
pub const GRADE_MEAN: &str = "G";
/// Mean parental education level
pub const PARENT_EDUCATION: &str = "Pedu";

/// Number of raw fields in a complete submission
pub const RAW_FIELD_COUNT: usize = 33;

/// Raw fields in the order the form submits them
pub const RAW_FIELDS: [&str; RAW_FIELD_COUNT] = [
    SCHOOL, SEX, AGE, ADDRESS, FAMSIZE, PSTATUS, MEDU, FEDU, MJOB, FJOB, REASON, GUARDIAN,
    TRAVELTIME, STUDYTIME, FAILURES, SCHOOLSUP, FAMSUP, PAID, ACTIVITIES, NURSERY, HIGHER,
    INTERNET, ROMANTIC, FAMREL, FREETIME, GOOUT, DALC, WALC, HEALTH, ABSENCES, G1, G2, SUBJECT,
];

/// Engineered fields appended after the raw fields
pub const DERIVED_FIELDS: [&str; 3] = [CHANGE, GRADE_MEAN, PARENT_EDUCATION];
