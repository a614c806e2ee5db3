//! GraphQL documents sent to the persistence backend

pub const CREATE_DEBRIEF: &str = r#"
mutation createDebrief($input: DebriefUpdate!) {
    createDebrief(input: $input) {
        id
    }
}"#;

pub const UPDATE_DEBRIEF: &str = r#"
mutation updateDebrief($input: DebriefUpdate!) {
    updateDebrief(input: $input) {
        id
    }
}"#;

pub const DELETE_DEBRIEF: &str = r#"
mutation deleteDebrief($id: ID!) {
    deleteDebrief(id: $id)
}"#;

pub const UPDATE_TASK: &str = r#"
mutation updateTask($input: TaskInput!) {
    updateTask(input: $input) {
        id
        completed
    }
}"#;

pub const GET_ALL_DEBRIEFS: &str = r#"
query getAllDebriefs {
    getAllDebriefs {
        id
        title
        date
        labels
        metaData {
            createdBy
        }
    }
}"#;

pub const GET_DEBRIEF: &str = r#"
query debriefs($id: ID!) {
    debriefs(input: {id: $id}) {
        id
        title
        date
        labels
        contentItems {
            ... on Table {
                id
                name
                index
                rows {
                    id
                    index
                    cells {
                        id
                        value
                    }
                }
                columns {
                    id
                    index
                    name
                }
            }
            ... on Paragraph {
                id
                name
                index
                comments {
                    id
                    index
                    bullet
                }
            }
        }
        lessons {
            id
            content
            cluster
            tasks {
                id
                content
                completed
                startDate
                deadline
                user {
                    id
                }
            }
        }
        tasks {
            id
            content
            completed
            startDate
            deadline
            user {
                id
            }
        }
        metaData {
            createdBy
            updatedBy
        }
    }
}"#;
