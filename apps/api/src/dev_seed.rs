use campusline_application::EntityService;
use campusline_core::{AppResult, CallerIdentity, Role, ScopeId};
use campusline_domain::{EntityKind, EntityRecord};
use serde_json::{Value, json};
use tracing::info;

const DEMO_MASTER_FRANCHISE: &str = "mf_istanbul";
const DEMO_LEARNING_CENTER: &str = "lc_kadikoy";

/// Seeds a small franchise network through the regular service layer.
pub async fn seed_demo_data(entity_service: &EntityService) -> AppResult<()> {
    let headquarters = CallerIdentity::unscoped(Role::Headquarters);
    let master_franchise = CallerIdentity::new(
        Role::MasterFranchise,
        Some(ScopeId::new(DEMO_MASTER_FRANCHISE)?),
    );
    let learning_center = CallerIdentity::new(
        Role::LearningCenter,
        Some(ScopeId::new(DEMO_LEARNING_CENTER)?),
    );

    let mental_arithmetic = create(
        entity_service,
        &headquarters,
        EntityKind::Program,
        json!({
            "name": "Mental Arithmetic",
            "code": "MA-100",
            "description": "Abacus-based arithmetic for ages 5 to 12",
            "category": "math",
            "status": "active",
            "visibility": "public",
            "sharedWithMFs": [],
            "sharedWithLCs": []
        }),
    )
    .await?;
    let robotics = create(
        entity_service,
        &headquarters,
        EntityKind::Program,
        json!({
            "name": "Robotics Foundations",
            "code": "RB-200",
            "description": "Hands-on robotics with block coding",
            "category": "stem",
            "status": "active",
            "visibility": "shared",
            "sharedWithMFs": [DEMO_MASTER_FRANCHISE],
            "sharedWithLCs": [DEMO_LEARNING_CENTER]
        }),
    )
    .await?;
    create(
        entity_service,
        &headquarters,
        EntityKind::Program,
        json!({
            "name": "Speed Reading",
            "code": "SR-300",
            "description": "Pilot curriculum, not yet released",
            "category": "language",
            "status": "draft",
            "visibility": "private"
        }),
    )
    .await?;

    let robotics_tr = create(
        entity_service,
        &master_franchise,
        EntityKind::SubProgram,
        json!({
            "name": "Robotics Foundations TR",
            "description": "Turkish adaptation with local kit suppliers",
            "programId": record_id(&robotics),
            "status": "active",
            "visibility": "shared",
            "sharedWithMFs": [],
            "sharedWithLCs": [DEMO_LEARNING_CENTER]
        }),
    )
    .await?;

    let saturday_group = create(
        entity_service,
        &learning_center,
        EntityKind::LearningGroup,
        json!({
            "name": "Saturday Juniors",
            "description": "Weekend cohort, ages 7 to 9",
            "programId": record_id(&mental_arithmetic),
            "subProgramId": null,
            "learningCenterId": DEMO_LEARNING_CENTER,
            "status": "active",
            "capacity": 12,
            "pricingSnapshot": {"currency": "TRY", "price": 4500.0, "installments": 3}
        }),
    )
    .await?;
    create(
        entity_service,
        &learning_center,
        EntityKind::LearningGroup,
        json!({
            "name": "Robotics Evening",
            "description": "Weekday evening robotics cohort",
            "programId": record_id(&robotics),
            "subProgramId": record_id(&robotics_tr),
            "learningCenterId": DEMO_LEARNING_CENTER,
            "status": "planned",
            "capacity": 10,
            "pricingSnapshot": "{\"currency\":\"TRY\",\"price\":6200}"
        }),
    )
    .await?;

    for teacher in [
        json!({"firstName": "Elif", "lastName": "Yilmaz", "email": "elif@kadikoy.example", "status": "active", "learningCenterId": DEMO_LEARNING_CENTER}),
        json!({"firstName": "Can", "lastName": "Demir", "email": "can@kadikoy.example", "status": "on_leave", "learningCenterId": DEMO_LEARNING_CENTER}),
    ] {
        create(entity_service, &learning_center, EntityKind::Teacher, teacher).await?;
    }

    for mut student in [
        json!({"firstName": "Deniz", "lastName": "Kaya", "email": "deniz@family.example", "parentName": "Aylin Kaya", "status": "active"}),
        json!({"firstName": "Mert", "lastName": "Aydin", "email": "mert@family.example", "parentName": "Burak Aydin", "status": "active"}),
        json!({"firstName": "Zeynep", "lastName": "Sahin", "email": "zeynep@family.example", "parentName": "Seda Sahin", "status": "inactive"}),
    ] {
        if let Some(fields) = student.as_object_mut() {
            fields.insert("learningGroupId".to_owned(), json!(record_id(&saturday_group)));
            fields.insert("learningCenterId".to_owned(), json!(DEMO_LEARNING_CENTER));
        }
        create(entity_service, &learning_center, EntityKind::Student, student).await?;
    }

    let abacus_kit = create(
        entity_service,
        &headquarters,
        EntityKind::Product,
        json!({"name": "Abacus Kit", "sku": "KIT-AB-01", "description": "Student abacus with workbook", "category": "materials", "status": "active", "price": 35.0}),
    )
    .await?;
    create(
        entity_service,
        &master_franchise,
        EntityKind::Order,
        json!({
            "orderNumber": "ORD-2024-0001",
            "customerName": "Kadikoy Learning Center",
            "notes": "Deliver before term start",
            "status": "processing",
            "paymentStatus": "paid",
            "items": [{"productId": record_id(&abacus_kit), "quantity": 12}]
        }),
    )
    .await?;

    create(
        entity_service,
        &headquarters,
        EntityKind::Training,
        json!({"title": "Abacus Instructor Certification", "description": "Two-day certification workshop", "trainerName": "Ayse Celik", "category": "certification", "status": "scheduled"}),
    )
    .await?;
    create(
        entity_service,
        &headquarters,
        EntityKind::Application,
        json!({"applicantName": "Hakan Ozturk", "email": "hakan@izmir.example", "organizationName": "Izmir Education Ltd.", "type": "master_franchise", "status": "pending"}),
    )
    .await?;

    for account in [
        json!({"name": "Istanbul Master Franchise", "email": "ops@istanbul.example", "organizationName": DEMO_MASTER_FRANCHISE, "role": "MF", "status": "active"}),
        json!({"name": "Kadikoy Learning Center", "email": "hello@kadikoy.example", "organizationName": DEMO_LEARNING_CENTER, "role": "LC", "status": "active"}),
    ] {
        create(entity_service, &headquarters, EntityKind::Account, account).await?;
    }

    info!(
        master_franchise = DEMO_MASTER_FRANCHISE,
        learning_center = DEMO_LEARNING_CENTER,
        "demo data seeded"
    );
    Ok(())
}

async fn create(
    entity_service: &EntityService,
    caller: &CallerIdentity,
    kind: EntityKind,
    payload: Value,
) -> AppResult<EntityRecord> {
    entity_service.create_record(caller, kind, payload).await
}

fn record_id(record: &EntityRecord) -> &str {
    record.record_id().as_str()
}
